use super::columns::ColumnSpec;
use super::record::Record;

/// Сумма колонки по записям; нечисловые ячейки считаются 0.
pub fn sum_column(records: &[Record], accessor: &str) -> f64 {
    records
        .iter()
        .filter_map(|r| r.cell(accessor))
        .map(|c| c.as_number())
        .sum()
}

/// `(accessor, total)` для каждой суммируемой колонки в порядке колонок.
pub fn column_totals(records: &[Record], columns: &[ColumnSpec]) -> Vec<(&'static str, f64)> {
    columns
        .iter()
        .filter(|c| c.summable)
        .map(|c| (c.accessor, sum_column(records, c.accessor)))
        .collect()
}

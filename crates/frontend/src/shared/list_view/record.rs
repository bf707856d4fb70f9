//! Маппинг сущностей бэкенда в готовые для таблицы записи.

use std::collections::HashMap;

use contracts::domain::a005_order::aggregate::OrderProduct;
use serde::de::DeserializeOwned;

use super::columns::{ColumnKind, ColumnSpec};
use crate::shared::components::table::{format_number, format_percent};
use crate::shared::date_utils::format_datetime;

/// Исходное значение поля сущности до преобразований колонки.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Text(String),
    Number(f64),
    Tags(Vec<String>),
    LineItems(Vec<OrderProduct>),
}

impl RawValue {
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => RawValue::Text(s.to_string()),
            _ => RawValue::Missing,
        }
    }

    pub fn number(value: Option<f64>) -> Self {
        value.map(RawValue::Number).unwrap_or(RawValue::Missing)
    }
}

/// Строка сущности, которую можно показать в списке.
///
/// `raw` вызывается для каждого accessor колонки; для неизвестных
/// возвращается [`RawValue::Missing`].
pub trait ListEntity: DeserializeOwned + Clone + 'static {
    fn id(&self) -> String;
    fn raw(&self, accessor: &str) -> RawValue;
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty(&'static str),
    Text(String),
    Number(f64),
    Percent(f64),
    DateTime { raw: String, display: String },
    Image(String),
    RowNumber(u64),
    Tags(Vec<String>),
    LineItems(Vec<OrderProduct>),
}

impl CellValue {
    /// Текст ячейки в таблице и выгрузках.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty(placeholder) => placeholder.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(v) => format_number(*v),
            CellValue::Percent(v) => format_percent(*v),
            CellValue::DateTime { display, .. } => display.clone(),
            CellValue::Image(url) => url.clone(),
            CellValue::RowNumber(n) => n.to_string(),
            CellValue::Tags(tags) => tags.join(", "),
            CellValue::LineItems(items) => line_items_summary(items),
        }
    }

    /// Число для итогов; нечисловое значение считается 0.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Number(v) | CellValue::Percent(v) => *v,
            CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Числовое значение для ячеек Excel.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) | CellValue::Percent(v) => Some(*v),
            CellValue::RowNumber(n) => Some(*n as f64),
            _ => None,
        }
    }
}

/// `name ×qty; name ×qty`
pub fn line_items_summary(items: &[OrderProduct]) -> String {
    items
        .iter()
        .map(|line| format!("{} ×{}", line.product_name(), trim_number(line.quantity)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub cells: HashMap<&'static str, CellValue>,
}

impl Record {
    pub fn cell(&self, accessor: &str) -> Option<&CellValue> {
        self.cells.get(accessor)
    }

    pub fn display(&self, accessor: &str) -> String {
        self.cell(accessor).map(CellValue::display).unwrap_or_default()
    }

    pub fn line_items(&self) -> &[OrderProduct] {
        self.cells
            .values()
            .find_map(|c| match c {
                CellValue::LineItems(items) => Some(items.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

/// Параметры маппинга помимо самих строк.
#[derive(Debug, Clone, PartialEq)]
pub struct MapContext {
    /// Страница строк, с 1.
    pub page: u32,
    pub page_size: u32,
    /// Адрес сервера со слешем, префикс путей `storage/...` для изображений.
    pub server_base: String,
    pub missing_value: &'static str,
}

impl MapContext {
    fn row_number(&self, index: usize) -> u64 {
        (index as u64 + 1) + (self.page.max(1) as u64 - 1) * self.page_size as u64
    }
}

pub fn resolve_image_url(value: &str, folder: &str, placeholder: &str, server_base: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else if value.starts_with("http") {
        value.to_string()
    } else {
        format!("{}storage/{}/{}", server_base, folder, value)
    }
}

fn map_cell(column: &ColumnSpec, raw: RawValue, row_number: u64, ctx: &MapContext) -> CellValue {
    match (column.kind, raw) {
        (ColumnKind::RowNumber, _) => CellValue::RowNumber(row_number),
        (ColumnKind::Image { folder, placeholder }, RawValue::Text(v)) => {
            CellValue::Image(resolve_image_url(&v, folder, placeholder, &ctx.server_base))
        }
        (ColumnKind::Image { placeholder, .. }, _) => CellValue::Image(placeholder.to_string()),
        (ColumnKind::Percent, RawValue::Number(v)) => CellValue::Percent(v),
        (ColumnKind::Percent, RawValue::Text(s)) => {
            CellValue::Percent(s.trim().parse().unwrap_or(0.0))
        }
        (ColumnKind::Percent, _) => CellValue::Percent(0.0),
        (ColumnKind::Number, RawValue::Number(v)) => CellValue::Number(v),
        (ColumnKind::Number, RawValue::Text(s)) => match s.trim().parse::<f64>() {
            Ok(v) => CellValue::Number(v),
            Err(_) => CellValue::Text(s),
        },
        (ColumnKind::Number, _) if column.summable => CellValue::Number(0.0),
        (ColumnKind::DateTime, RawValue::Text(raw)) => CellValue::DateTime {
            display: format_datetime(&raw),
            raw,
        },
        (ColumnKind::Relation, RawValue::Missing) => CellValue::Empty("-"),
        (ColumnKind::Tags, RawValue::Tags(tags)) => CellValue::Tags(tags),
        (ColumnKind::LineItems, RawValue::LineItems(items)) => CellValue::LineItems(items),
        (ColumnKind::LineItems, _) => CellValue::LineItems(Vec::new()),
        (_, RawValue::Text(s)) => CellValue::Text(s),
        (_, RawValue::Number(v)) => CellValue::Number(v),
        (_, RawValue::Tags(tags)) => CellValue::Tags(tags),
        (_, RawValue::LineItems(items)) => CellValue::LineItems(items),
        (_, RawValue::Missing) => CellValue::Empty(ctx.missing_value),
    }
}

/// Маппинг одной страницы; чистая функция, определена для любых колонок.
pub fn map_rows<T: ListEntity>(rows: &[T], columns: &[ColumnSpec], ctx: &MapContext) -> Vec<Record> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row_number = ctx.row_number(index);
            let cells = columns
                .iter()
                .map(|column| {
                    let raw = match column.kind {
                        ColumnKind::RowNumber => RawValue::Missing,
                        _ => row.raw(column.accessor),
                    };
                    (column.accessor, map_cell(column, raw, row_number, ctx))
                })
                .collect();
            Record {
                id: row.id(),
                cells,
            }
        })
        .collect()
}

/// Текущая версия строки `id`: номер и значения после пересортировки или обновления
pub fn find_record<'a>(records: &'a [Record], id: &str) -> Option<&'a Record> {
    records.iter().find(|r| r.id == id)
}

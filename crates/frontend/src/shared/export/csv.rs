//! Экспорт в CSV.

use super::{ExportError, ExportJob};

const BOM: &str = "\u{FEFF}";

fn render_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Render(e.to_string())
}

/// Через запятую, UTF-8 с BOM для табличных редакторов.
pub fn render(job: &ExportJob) -> Result<Vec<u8>, ExportError> {
    let mut wtr = ::csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(BOM.as_bytes().to_vec());

    for line in job.metadata_lines() {
        wtr.write_record([line]).map_err(render_err)?;
    }
    wtr.write_record(std::iter::empty::<&str>()).map_err(render_err)?;

    wtr.write_record(job.header_row()).map_err(render_err)?;
    for row in job.body_rows() {
        wtr.write_record(row).map_err(render_err)?;
    }
    if let Some(totals) = job.totals_row() {
        wtr.write_record(totals).map_err(render_err)?;
    }

    wtr.into_inner().map_err(render_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::tests::sample_job;

    #[test]
    fn test_csv_layout() {
        let bytes = render(&sample_job()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with(BOM));
        assert!(text.contains("Items - Toko Maju\n"));
        assert!(text.contains("Search: ko\n"));
        assert!(text.contains("\nNo,Name,Total\n"));
        // запятая внутри значения в кавычках
        assert!(text.contains("1,\"Kopi, Susu\",1.500\n"));
        assert!(text.contains("2,Teh,250\n"));
        assert!(text.ends_with("Total,,1.750\n"));
    }

    #[test]
    fn test_no_totals_row_without_summable_columns() {
        let mut job = sample_job();
        job.columns.retain(|c| !c.summable);
        let text = String::from_utf8(render(&job).unwrap()).unwrap();
        assert!(text.ends_with("2,Teh\n"));
    }
}

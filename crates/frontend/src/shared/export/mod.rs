//! Выгрузка всего результата списка, без постраничной разбивки.
//!
//! Задание выводится в один из трёх форматов. У всех одинаковая структура:
//! блок метаданных (заголовок, магазин, время, итог сервера, фильтры),
//! строка заголовков, строки записей и строка итогов по суммируемым колонкам.

pub mod csv;
pub mod download;
pub mod pdf;
pub mod xlsx;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::shared::components::table::format_number;
use crate::shared::date_utils::{file_stamp, generated_at};
use crate::shared::list_view::binder::{BinderError, CollectionSource, DataBinder, Delay};
use crate::shared::list_view::columns::{ColumnSpec, EntityConfig};
use crate::shared::list_view::record::{ListEntity, MapContext, Record};
use crate::shared::list_view::totals::column_totals;
use crate::shared::list_view::view_state::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Xlsx, ExportFormat::Csv];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv;charset=utf-8;",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Xlsx => "Excel",
            ExportFormat::Csv => "CSV",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export aborted: {0}")]
    Fetch(#[from] BinderError),
    #[error("cannot build document: {0}")]
    Render(String),
    #[error("download failed: {0}")]
    Download(String),
}

/// Активные фильтры на момент выгрузки, пары `(label, value)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSnapshot(pub Vec<(String, String)>);

impl FilterSnapshot {
    pub fn from_state(state: &ViewState, config: &EntityConfig) -> Self {
        let mut items = Vec::new();
        let title_of = |accessor: &str| {
            config
                .column(accessor)
                .map(|c| c.title.to_string())
                .unwrap_or_else(|| accessor.to_string())
        };
        if !state.search.is_empty() {
            items.push(("Search".to_string(), state.search.clone()));
        }
        if !state.filter_column.is_empty() && !state.filter_value.is_empty() {
            items.push((
                "Filter".to_string(),
                format!("{} = {}", title_of(&state.filter_column), state.filter_value),
            ));
        }
        items.push((
            "Sort".to_string(),
            format!(
                "{} {}",
                title_of(&state.sort.column_accessor),
                state.sort.direction.as_str()
            ),
        ));
        if config.report {
            if !state.date_filter_value.is_empty() {
                items.push((
                    format!("Date ({})", state.date_filter_mode.label()),
                    state.date_filter_value.clone(),
                ));
            }
            let range = &state.date_range;
            if !range.start.is_empty() || !range.end.is_empty() {
                items.push((
                    "Date range".to_string(),
                    format!("{} - {}", range.start, range.end),
                ));
            }
            let price = &state.price_range;
            if !price.min.is_empty() || !price.max.is_empty() {
                items.push((
                    "Price range".to_string(),
                    format!("{} - {}", price.min, price.max),
                ));
            }
        }
        Self(items)
    }
}

/// Одно задание выгрузки; создаётся по запросу и передаётся в [`render`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub tenant_label: String,
    pub entity_label: String,
    pub columns: Vec<&'static ColumnSpec>,
    pub records: Vec<Record>,
    /// Итог, сообщённый сервером для набора фильтров
    pub server_total: u64,
    pub filters: FilterSnapshot,
    pub generated_at: DateTime<Utc>,
}

impl ExportJob {
    pub fn title(&self) -> String {
        format!("{} - {}", self.entity_label, self.tenant_label)
    }

    pub fn metadata_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.title(),
            format!("Store: {}", self.tenant_label),
            format!("Generated: {}", generated_at(self.generated_at)),
            format!("Rows: {}", self.records.len()),
            format!("Server total: {}", self.server_total),
        ];
        lines.extend(
            self.filters
                .0
                .iter()
                .map(|(label, value)| format!("{label}: {value}")),
        );
        lines
    }

    pub fn header_row(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.title.to_string()).collect()
    }

    pub fn body_rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|r| self.columns.iter().map(|c| r.display(c.accessor)).collect())
            .collect()
    }

    /// Итоги по видимым колонкам: `Some(sum)` для суммируемых.
    pub fn totals(&self) -> Option<Vec<Option<f64>>> {
        let columns: Vec<ColumnSpec> = self.columns.iter().map(|c| **c).collect();
        let sums = column_totals(&self.records, &columns);
        if sums.is_empty() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| {
                    sums.iter()
                        .find(|(accessor, _)| *accessor == c.accessor)
                        .map(|(_, v)| *v)
                })
                .collect(),
        )
    }

    /// Итоги текстом; подпись стоит в первой несуммируемой ячейке.
    pub fn totals_row(&self) -> Option<Vec<String>> {
        let totals = self.totals()?;
        let mut labelled = false;
        Some(
            totals
                .into_iter()
                .map(|t| match t {
                    Some(v) => format_number(v),
                    None if !labelled => {
                        labelled = true;
                        "Total".to_string()
                    }
                    None => String::new(),
                })
                .collect(),
        )
    }

    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "{}_{}_{}.{}",
            file_label(&self.tenant_label),
            file_label(&self.entity_label),
            file_stamp(self.generated_at),
            format.extension()
        )
    }
}

/// Буквы, цифры, `-` и `_` остаются, остальное заменяется на `_`.
fn file_label(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned
    }
}

pub fn render(job: &ExportJob, format: ExportFormat) -> Result<ExportFile, ExportError> {
    let bytes = match format {
        ExportFormat::Csv => csv::render(job)?,
        ExportFormat::Xlsx => xlsx::render(job)?,
        ExportFormat::Pdf => pdf::render(job),
    };
    Ok(ExportFile {
        file_name: job.file_name(format),
        mime: format.mime(),
        bytes,
    })
}

/// Подписи и состояние выгружаемого экрана.
pub struct ExportContext<'a> {
    pub config: &'a EntityConfig,
    pub tenant_label: &'a str,
    pub state: &'a ViewState,
    pub hidden: &'a dyn Fn(&str) -> bool,
    pub map: MapContext,
    pub now: DateTime<Utc>,
}

/// Собирает все страницы по текущим фильтрам и формирует документ.
/// При ошибке любой страницы файл не создаётся.
pub async fn build_export<T, C, D>(
    binder: &DataBinder<T, C>,
    delay: &D,
    ctx: &ExportContext<'_>,
    format: ExportFormat,
) -> Result<ExportFile, ExportError>
where
    T: ListEntity,
    C: CollectionSource<T>,
    D: Delay + ?Sized,
{
    let query = ctx.state.to_query(ctx.config.report);
    let all = binder.fetch_all(&query, delay, &ctx.map).await?;
    log::info!(
        "export {}: {} rows (server total {})",
        ctx.config.key,
        all.records.len(),
        all.total
    );
    let job = ExportJob {
        tenant_label: ctx.tenant_label.to_string(),
        entity_label: ctx.config.title.to_string(),
        columns: ctx
            .config
            .columns
            .iter()
            .filter(|c| !(ctx.hidden)(c.accessor))
            .collect(),
        records: all.records,
        server_total: all.total,
        filters: FilterSnapshot::from_state(ctx.state, ctx.config),
        generated_at: ctx.now,
    };
    render(&job, format)
}

use serde::{Deserialize, Serialize};

/// Направление сортировки колонки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Шаг фильтра отчёта по дате.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateFilterMode {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl DateFilterMode {
    pub const ALL: [DateFilterMode; 3] = [
        DateFilterMode::Daily,
        DateFilterMode::Monthly,
        DateFilterMode::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateFilterMode::Daily => "daily",
            DateFilterMode::Monthly => "monthly",
            DateFilterMode::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(DateFilterMode::Daily),
            "monthly" => Some(DateFilterMode::Monthly),
            "yearly" => Some(DateFilterMode::Yearly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateFilterMode::Daily => "Daily",
            DateFilterMode::Monthly => "Monthly",
            DateFilterMode::Yearly => "Yearly",
        }
    }
}

/// Параметры запроса к коллекции сущности.
///
/// Имена полей совпадают с query string эндпоинта коллекции, структура
/// сериализуется через `serde_qs` как есть.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: u32,
    #[serde(rename = "per_page")]
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sort: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filter_column: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filter_value: String,

    // только для отчётов
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_date_filter: Option<DateFilterMode>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filter_date_value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub range_date_start: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub range_date_end: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub range_price_min: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub range_price_max: String,
}

impl ListQuery {
    /// Тот же запрос для другой страницы.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

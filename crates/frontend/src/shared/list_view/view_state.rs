//! Сохраняемое состояние экрана списка: страница, сортировка, фильтры, скрытые колонки.
//!
//! Каждый сеттер сразу пишет изменённое поле в хранилище под ключом
//! `{tenant}_{entity}_{field}`, и экран после перехода или перезагрузки
//! открывается в том же виде.

use std::collections::BTreeSet;

use contracts::shared::list_query::{DateFilterMode, ListQuery, SortDirection};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::storage::{KeyValueStore, Namespace};

/// Суффиксы ключей хранилища.
pub mod field {
    pub const PAGE: &str = "page";
    pub const PAGE_SIZE: &str = "page_size";
    pub const SORT: &str = "sort";
    pub const SEARCH: &str = "search";
    pub const FILTER_COLUMN: &str = "filter_column";
    pub const FILTER_VALUE: &str = "filter_value";
    pub const HIDDEN_COLUMNS: &str = "cols";
    pub const DATE_FILTER_MODE: &str = "selected_date_filter";
    pub const DATE_FILTER_VALUE: &str = "filter_date_value";
    pub const DATE_RANGE: &str = "range_date";
    pub const PRICE_RANGE: &str = "range_price";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortStatus {
    pub column_accessor: String,
    pub direction: SortDirection,
}

impl SortStatus {
    pub fn new(column: &str, direction: SortDirection) -> Self {
        Self {
            column_accessor: column.to_string(),
            direction,
        }
    }
}

impl Default for SortStatus {
    fn default() -> Self {
        Self::new("created_at", SortDirection::Desc)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DateRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PriceRange {
    #[serde(default)]
    pub min: String,
    #[serde(default)]
    pub max: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// С 1.
    pub page: u32,
    pub page_size: u32,
    pub sort: SortStatus,
    pub search: String,
    pub filter_column: String,
    pub filter_value: String,
    pub hidden_columns: BTreeSet<String>,

    // только для отчётов
    pub date_filter_mode: DateFilterMode,
    pub date_filter_value: String,
    pub date_range: DateRange,
    pub price_range: PriceRange,
}

impl ViewState {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            sort: SortStatus::default(),
            search: String::new(),
            filter_column: String::new(),
            filter_value: String::new(),
            hidden_columns: BTreeSet::new(),
            date_filter_mode: DateFilterMode::default(),
            date_filter_value: String::new(),
            date_range: DateRange::default(),
            price_range: PriceRange::default(),
        }
    }

    pub fn is_hidden(&self, accessor: &str) -> bool {
        self.hidden_columns.contains(accessor)
    }

    /// Запрос коллекции для текущей страницы. `report` добавляет фильтры
    /// по дате и цене.
    pub fn to_query(&self, report: bool) -> ListQuery {
        let mut query = ListQuery {
            page: self.page,
            per_page: self.page_size,
            search: self.search.clone(),
            sort: self.sort.column_accessor.clone(),
            direction: Some(self.sort.direction),
            ..ListQuery::default()
        };
        if !self.filter_column.is_empty() {
            query.filter_column = self.filter_column.clone();
            query.filter_value = self.filter_value.clone();
        }
        if report {
            query.selected_date_filter = Some(self.date_filter_mode);
            query.filter_date_value = self.date_filter_value.clone();
            query.range_date_start = self.date_range.start.clone();
            query.range_date_end = self.date_range.end.clone();
            query.range_price_min = self.price_range.min.clone();
            query.range_price_max = self.price_range.max.clone();
        }
        query
    }
}

/// Владелец [`ViewState`] экрана и его хранилища.
#[derive(Debug, Clone)]
pub struct ViewStateStore<S> {
    storage: S,
    namespace: Namespace,
    state: ViewState,
}

impl<S: KeyValueStore> ViewStateStore<S> {
    /// Читает все поля из хранилища, иначе значения по умолчанию. Записи,
    /// которые не разбираются, удаляются из хранилища.
    pub fn open(storage: S, namespace: Namespace, default_page_size: u32) -> Self {
        let mut this = Self {
            storage,
            namespace,
            state: ViewState::with_page_size(default_page_size),
        };
        this.restore();
        this
    }

    fn restore(&mut self) {
        if let Some(page) = self.read_with(field::PAGE, parse_positive) {
            self.state.page = page;
        }
        if let Some(size) = self.read_with(field::PAGE_SIZE, parse_positive) {
            self.state.page_size = size;
        }
        if let Some(sort) = self.read_json::<SortStatus>(field::SORT) {
            self.state.sort = sort;
        }
        if let Some(search) = self.storage.get(&self.namespace.key(field::SEARCH)) {
            self.state.search = search;
        }
        if let Some(column) = self.storage.get(&self.namespace.key(field::FILTER_COLUMN)) {
            self.state.filter_column = column;
        }
        if let Some(value) = self.storage.get(&self.namespace.key(field::FILTER_VALUE)) {
            self.state.filter_value = value;
        }
        if let Some(hidden) = self.read_json::<BTreeSet<String>>(field::HIDDEN_COLUMNS) {
            self.state.hidden_columns = hidden;
        }
        if let Some(mode) = self.read_with(field::DATE_FILTER_MODE, DateFilterMode::parse) {
            self.state.date_filter_mode = mode;
        }
        if let Some(value) = self
            .storage
            .get(&self.namespace.key(field::DATE_FILTER_VALUE))
        {
            self.state.date_filter_value = value;
        }
        if let Some(range) = self.read_json::<DateRange>(field::DATE_RANGE) {
            self.state.date_range = range;
        }
        if let Some(range) = self.read_json::<PriceRange>(field::PRICE_RANGE) {
            self.state.price_range = range;
        }
    }

    fn read_with<T>(&self, name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let key = self.namespace.key(name);
        let raw = self.storage.get(&key)?;
        match parse(raw.trim()) {
            Some(v) => Some(v),
            None => {
                log::warn!("view state: discarding malformed {key}={raw:?}");
                self.storage.remove(&key);
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.read_with(name, |raw| serde_json::from_str::<T>(raw).ok())
    }

    fn write(&self, name: &str, value: &str) {
        self.storage.set(&self.namespace.key(name), value);
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.write(name, &raw),
            Err(e) => log::error!("view state: cannot encode {name}: {e}"),
        }
    }

    fn reset_page(&mut self) {
        if self.state.page != 1 {
            self.set_page(1);
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn set_page(&mut self, page: u32) {
        self.state.page = page.max(1);
        self.write(field::PAGE, &self.state.page.to_string());
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.state.page_size = page_size.max(1);
        self.write(field::PAGE_SIZE, &self.state.page_size.to_string());
        self.reset_page();
    }

    pub fn set_sort(&mut self, sort: SortStatus) {
        self.write_json(field::SORT, &sort);
        self.state.sort = sort;
        self.reset_page();
    }

    /// Клик по заголовку: та же колонка меняет направление, другая начинает с asc.
    pub fn toggle_sort(&mut self, accessor: &str) {
        let sort = if self.state.sort.column_accessor == accessor {
            SortStatus::new(accessor, self.state.sort.direction.toggled())
        } else {
            SortStatus::new(accessor, SortDirection::Asc)
        };
        self.set_sort(sort);
    }

    pub fn set_search(&mut self, search: &str) {
        if self.state.search == search {
            return;
        }
        self.state.search = search.to_string();
        self.write(field::SEARCH, search);
        self.reset_page();
    }

    pub fn set_filter_column(&mut self, column: &str) {
        if self.state.filter_column == column {
            return;
        }
        self.state.filter_column = column.to_string();
        self.write(field::FILTER_COLUMN, column);
        self.reset_page();
    }

    pub fn set_filter_value(&mut self, value: &str) {
        if self.state.filter_value == value {
            return;
        }
        self.state.filter_value = value.to_string();
        self.write(field::FILTER_VALUE, value);
        self.reset_page();
    }

    pub fn toggle_column(&mut self, accessor: &str) {
        if !self.state.hidden_columns.remove(accessor) {
            self.state.hidden_columns.insert(accessor.to_string());
        }
        self.write_json(field::HIDDEN_COLUMNS, &self.state.hidden_columns);
    }

    /// Смена режима очищает дату: её формат зависит от режима.
    pub fn set_date_filter_mode(&mut self, mode: DateFilterMode) {
        if self.state.date_filter_mode == mode {
            return;
        }
        self.state.date_filter_mode = mode;
        self.write(field::DATE_FILTER_MODE, mode.as_str());
        self.state.date_filter_value.clear();
        self.write(field::DATE_FILTER_VALUE, "");
        self.reset_page();
    }

    pub fn set_date_filter_value(&mut self, value: &str) {
        if self.state.date_filter_value == value {
            return;
        }
        self.state.date_filter_value = value.to_string();
        self.write(field::DATE_FILTER_VALUE, value);
        self.reset_page();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        if self.state.date_range == range {
            return;
        }
        self.write_json(field::DATE_RANGE, &range);
        self.state.date_range = range;
        self.reset_page();
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        if self.state.price_range == range {
            return;
        }
        self.write_json(field::PRICE_RANGE, &range);
        self.state.price_range = range;
        self.reset_page();
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::storage::MemoryStore;

    fn open(storage: &MemoryStore) -> ViewStateStore<MemoryStore> {
        ViewStateStore::open(storage.clone(), Namespace::new("store1", "products"), 10)
    }

    #[test]
    fn test_defaults_on_empty_storage() {
        let storage = MemoryStore::new();
        let store = open(&storage);
        let st = store.state();
        assert_eq!(st.page, 1);
        assert_eq!(st.page_size, 10);
        assert_eq!(st.sort, SortStatus::new("created_at", SortDirection::Desc));
        assert!(st.hidden_columns.is_empty());
        assert!(st.filter_column.is_empty());
        assert_eq!(st.date_filter_mode, DateFilterMode::Daily);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_round_trip_restores_identical_state() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.set_search("kopi");
        store.set_filter_column("unit");
        store.set_filter_value("pcs");
        store.toggle_sort("product_name");
        store.toggle_column("description");
        store.toggle_column("supplier");
        store.set_page(4);

        let restored = open(&storage);
        assert_eq!(restored.state(), store.state());
        assert_eq!(restored.state().page, 4);
        assert_eq!(
            restored.state().sort,
            SortStatus::new("product_name", SortDirection::Asc)
        );
    }

    #[test]
    fn test_keys_use_entity_namespace() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.set_page(3);
        store.toggle_column("unit");
        assert_eq!(storage.get("store1_products_page").as_deref(), Some("3"));
        assert_eq!(
            storage.get("store1_products_cols").as_deref(),
            Some(r#"["unit"]"#)
        );

        let other = ViewStateStore::open(
            storage.clone(),
            Namespace::new("store1", "categories"),
            10,
        );
        assert_eq!(other.state().page, 1);
        assert!(other.state().hidden_columns.is_empty());
    }

    #[test]
    fn test_sort_is_stored_in_datatable_shape() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.set_sort(SortStatus::new("unit", SortDirection::Desc));
        assert_eq!(
            storage.get("store1_products_sort").as_deref(),
            Some(r#"{"columnAccessor":"unit","direction":"desc"}"#)
        );
    }

    #[test]
    fn test_toggle_sort_flips_direction_on_same_column() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.toggle_sort("created_at");
        assert_eq!(store.state().sort.direction, SortDirection::Asc);
        store.toggle_sort("created_at");
        assert_eq!(store.state().sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_hidden_column_toggle_survives_reload() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.toggle_column("unit");
        assert!(open(&storage).state().is_hidden("unit"));

        store.toggle_column("unit");
        assert!(!open(&storage).state().is_hidden("unit"));
    }

    #[test]
    fn test_malformed_entries_fall_back_to_defaults() {
        let storage = MemoryStore::new();
        storage.set("store1_products_sort", "{not json");
        storage.set("store1_products_cols", "unit,supplier");
        storage.set("store1_products_page", "abc");
        storage.set("store1_products_selected_date_filter", "weekly");
        storage.set("store1_products_range_date", "[]");

        let store = open(&storage);
        let st = store.state();
        assert_eq!(st.sort, SortStatus::default());
        assert!(st.hidden_columns.is_empty());
        assert_eq!(st.page, 1);
        assert_eq!(st.date_filter_mode, DateFilterMode::Daily);
        assert_eq!(st.date_range, DateRange::default());
        // битые записи заменяются
        assert!(storage.get("store1_products_sort").is_none());
        assert!(storage.get("store1_products_cols").is_none());
        assert!(storage.get("store1_products_page").is_none());
    }

    #[test]
    fn test_zero_page_is_rejected() {
        let storage = MemoryStore::new();
        storage.set("store1_products_page", "0");
        assert_eq!(open(&storage).state().page, 1);
    }

    #[test]
    fn test_empty_range_object_restores_as_empty_range() {
        let storage = MemoryStore::new();
        storage.set("store1_products_range_price", "{}");
        let store = open(&storage);
        assert_eq!(store.state().price_range, PriceRange::default());
        assert!(storage.get("store1_products_range_price").is_some());
    }

    #[test]
    fn test_date_mode_change_clears_date_value() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.set_date_filter_value("2024-03-15");
        store.set_page(2);

        store.set_date_filter_mode(DateFilterMode::Monthly);

        let st = store.state();
        assert_eq!(st.date_filter_mode, DateFilterMode::Monthly);
        assert_eq!(st.date_filter_value, "");
        assert_eq!(st.page, 1);
        assert_eq!(
            storage.get("store1_products_filter_date_value").as_deref(),
            Some("")
        );

        let query = st.to_query(true);
        assert_eq!(query.selected_date_filter, Some(DateFilterMode::Monthly));
        assert_eq!(query.filter_date_value, "");
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.set_page(5);
        store.set_search("teh");
        assert_eq!(store.state().page, 1);
        assert_eq!(storage.get("store1_products_page").as_deref(), Some("1"));
    }

    #[test]
    fn test_query_omits_report_filters_for_plain_lists() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.set_date_filter_value("2024");
        let query = store.state().to_query(false);
        assert_eq!(query.selected_date_filter, None);
        assert!(query.filter_date_value.is_empty());
        assert_eq!(query.per_page, 10);
        assert_eq!(query.direction, Some(SortDirection::Desc));
    }

    #[test]
    fn test_filter_value_without_column_is_not_sent() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.set_filter_value("pcs");
        let query = store.state().to_query(false);
        assert!(query.filter_column.is_empty());
        assert!(query.filter_value.is_empty());
    }
}

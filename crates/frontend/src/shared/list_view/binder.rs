//! Связка с бэкендом: запрос к эндпоинту коллекции и маппинг строк.

use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;

use async_trait::async_trait;
use contracts::shared::list_query::ListQuery;
use contracts::shared::paginated::Paginated;
use thiserror::Error;

use super::columns::ColumnSpec;
use super::record::{map_rows, ListEntity, MapContext, Record};

/// Пауза между запросами страниц при сборе полной выгрузки.
pub const FETCH_ALL_DELAY_MS: u32 = 500;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid query: {0}")]
    Query(String),
    #[error("loading page {page} failed: {source}")]
    ExportPage {
        page: u32,
        #[source]
        source: Box<BinderError>,
    },
}

/// Эндпоинт коллекции одной сущности.
#[async_trait(?Send)]
pub trait CollectionSource<T> {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Paginated<T>, BinderError>;
}

#[async_trait(?Send)]
pub trait Delay {
    async fn wait(&self, ms: u32);
}

/// Таймер браузера.
pub struct GlooDelay;

#[async_trait(?Send)]
impl Delay for GlooDelay {
    async fn wait(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

/// Счётчик запросов: применяется только результат последней загрузки.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration(Rc<Cell<u64>>);

impl RequestGeneration {
    pub fn issue(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    pub records: Vec<Record>,
    /// Итог сервера по фильтрам, а не длина страницы.
    pub total: u64,
    pub last_page: u32,
}

/// Полный результат запроса без разбивки на страницы.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedAll {
    pub records: Vec<Record>,
    pub total: u64,
}

pub struct DataBinder<T, C> {
    source: C,
    columns: &'static [ColumnSpec],
    generation: RequestGeneration,
    _row: PhantomData<T>,
}

impl<T: ListEntity, C: CollectionSource<T>> DataBinder<T, C> {
    pub fn new(source: C, columns: &'static [ColumnSpec]) -> Self {
        Self {
            source,
            columns,
            generation: RequestGeneration::default(),
            _row: PhantomData,
        }
    }

    pub fn generation(&self) -> &RequestGeneration {
        &self.generation
    }

    /// Загрузка одной страницы. `Ok(None)`: пока запрос выполнялся, начата
    /// более новая загрузка, и ответ применять нельзя.
    pub async fn load(
        &self,
        query: &ListQuery,
        ctx: &MapContext,
    ) -> Result<Option<LoadedPage>, BinderError> {
        let ticket = self.generation.issue();
        let result = self.source.fetch_page(query).await;
        if !self.generation.is_current(ticket) {
            log::debug!(
                "binder: dropping stale response for page {} (ticket {})",
                query.page,
                ticket
            );
            return Ok(None);
        }
        let page = result?;
        let ctx = MapContext {
            page: query.page,
            page_size: query.per_page,
            ..ctx.clone()
        };
        Ok(Some(LoadedPage {
            records: map_rows(&page.data, self.columns, &ctx),
            total: page.total,
            last_page: page.last_page.max(1),
        }))
    }

    /// Проходит страницы с первой до последней по данным сервера,
    /// по одному запросу с паузой. Ошибка любой страницы прерывает
    /// весь сбор.
    pub async fn fetch_all<D: Delay + ?Sized>(
        &self,
        query: &ListQuery,
        delay: &D,
        ctx: &MapContext,
    ) -> Result<FetchedAll, BinderError> {
        let mut rows: Vec<T> = Vec::new();
        let mut total;
        let mut page = 1;
        loop {
            let response = self
                .source
                .fetch_page(&query.with_page(page))
                .await
                .map_err(|e| BinderError::ExportPage {
                    page,
                    source: Box::new(e),
                })?;
            total = response.total;
            let last_page = response.last_page.max(1);
            rows.extend(response.data);
            log::debug!("binder: fetched page {page}/{last_page}, {} rows so far", rows.len());
            if page >= last_page {
                break;
            }
            page += 1;
            delay.wait(FETCH_ALL_DELAY_MS).await;
        }
        if rows.len() as u64 != total {
            log::warn!(
                "binder: collected {} rows but server reported {total}",
                rows.len()
            );
        }
        let ctx = MapContext {
            page: 1,
            page_size: rows.len() as u32,
            ..ctx.clone()
        };
        Ok(FetchedAll {
            records: map_rows(&rows, self.columns, &ctx),
            total,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::list_view::record::tests::{ctx, Item, ITEM_COLUMNS};
    use crate::shared::list_view::record::CellValue;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Отдаёт `total` сгенерированных записей, одна страница может падать.
    pub struct FakeSource {
        pub total: u64,
        pub fail_page: Option<u32>,
        pub requests: RefCell<Vec<ListQuery>>,
    }

    impl FakeSource {
        pub fn new(total: u64) -> Self {
            Self {
                total,
                fail_page: None,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl CollectionSource<Item> for FakeSource {
        async fn fetch_page(&self, query: &ListQuery) -> Result<Paginated<Item>, BinderError> {
            self.requests.borrow_mut().push(query.clone());
            if self.fail_page == Some(query.page) {
                return Err(BinderError::Status {
                    status: 500,
                    message: "boom".into(),
                });
            }
            let per_page = query.per_page.max(1) as u64;
            let start = (query.page as u64 - 1) * per_page;
            let end = (start + per_page).min(self.total);
            let data = (start..end)
                .map(|i| Item::named(i as i64 + 1, &format!("item {}", i + 1)))
                .collect();
            Ok(Paginated {
                data,
                total: self.total,
                last_page: self.total.div_ceil(per_page).max(1) as u32,
                current_page: Some(query.page),
                per_page: Some(query.per_page),
            })
        }
    }

    #[derive(Default)]
    pub struct RecordingDelay {
        pub waits: RefCell<Vec<u32>>,
    }

    #[async_trait(?Send)]
    impl Delay for RecordingDelay {
        async fn wait(&self, ms: u32) {
            self.waits.borrow_mut().push(ms);
        }
    }

    fn query(page: u32, per_page: u32) -> ListQuery {
        ListQuery {
            page,
            per_page,
            ..ListQuery::default()
        }
    }

    #[test]
    fn test_load_reports_server_total() {
        let binder = DataBinder::<Item, _>::new(FakeSource::new(237), ITEM_COLUMNS);
        let loaded = block_on(binder.load(&query(2, 10), &ctx(1, 10)))
            .unwrap()
            .unwrap();
        assert_eq!(loaded.records.len(), 10);
        assert_eq!(loaded.total, 237);
        assert_eq!(loaded.last_page, 24);
        assert_eq!(loaded.records[0].cell("no"), Some(&CellValue::RowNumber(11)));
    }

    #[test]
    fn test_fetch_all_collects_every_page() {
        let binder = DataBinder::<Item, _>::new(FakeSource::new(237), ITEM_COLUMNS);
        let delay = RecordingDelay::default();
        let all = block_on(binder.fetch_all(&query(3, 10), &delay, &ctx(3, 10))).unwrap();

        assert_eq!(all.records.len(), 237);
        assert_eq!(all.total, 237);
        assert_eq!(all.records[236].cell("no"), Some(&CellValue::RowNumber(237)));

        let pages: Vec<u32> = binder.source.requests.borrow().iter().map(|q| q.page).collect();
        assert_eq!(pages, (1..=24).collect::<Vec<_>>());
        assert_eq!(delay.waits.borrow().len(), 23);
        assert!(delay.waits.borrow().iter().all(|ms| *ms == FETCH_ALL_DELAY_MS));
    }

    #[test]
    fn test_fetch_all_aborts_on_failed_page() {
        let mut source = FakeSource::new(30);
        source.fail_page = Some(2);
        let binder = DataBinder::<Item, _>::new(source, ITEM_COLUMNS);
        let delay = RecordingDelay::default();
        let err = block_on(binder.fetch_all(&query(1, 10), &delay, &ctx(1, 10))).unwrap_err();

        assert!(matches!(err, BinderError::ExportPage { page: 2, .. }));
        assert_eq!(binder.source.requests.borrow().len(), 2);
    }

    #[test]
    fn test_fetch_all_empty_collection() {
        let binder = DataBinder::<Item, _>::new(FakeSource::new(0), ITEM_COLUMNS);
        let delay = RecordingDelay::default();
        let all = block_on(binder.fetch_all(&query(1, 10), &delay, &ctx(1, 10))).unwrap();
        assert!(all.records.is_empty());
        assert!(delay.waits.borrow().is_empty());
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let generation = RequestGeneration::default();
        let first = generation.issue();
        let second = generation.issue();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    /// Источник, который выдаёт новый номер, пока первый запрос в полёте.
    struct RacingSource {
        generation: RequestGeneration,
    }

    #[async_trait(?Send)]
    impl CollectionSource<Item> for RacingSource {
        async fn fetch_page(&self, _query: &ListQuery) -> Result<Paginated<Item>, BinderError> {
            self.generation.issue();
            Ok(Paginated::empty())
        }
    }

    #[test]
    fn test_superseded_load_returns_none() {
        let generation = RequestGeneration::default();
        let mut binder = DataBinder::<Item, _>::new(
            RacingSource {
                generation: generation.clone(),
            },
            ITEM_COLUMNS,
        );
        binder.generation = generation;
        let result = block_on(binder.load(&query(1, 10), &ctx(1, 10))).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_error_is_returned() {
        let mut source = FakeSource::new(5);
        source.fail_page = Some(1);
        let binder = DataBinder::<Item, _>::new(source, ITEM_COLUMNS);
        let err = block_on(binder.load(&query(1, 10), &ctx(1, 10))).unwrap_err();
        assert_eq!(err.to_string(), "server responded 500: boom");
    }
}

//! Массовое удаление выбранных строк.

use std::collections::BTreeSet;

use async_trait::async_trait;
use contracts::shared::bulk_delete::DeleteItemResult;

/// Подтверждение необратимого действия.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// `window.confirm`; без window ответ "нет".
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Эндпоинт удаления одной сущности.
#[async_trait(?Send)]
pub trait DeletionSink {
    async fn delete_one(&self, id: &str) -> DeleteItemResult;

    /// Один запрос на id по порядку. Бэкенд с пакетным эндпоинтом переопределяет.
    async fn delete_many(&self, ids: &[String]) -> Vec<DeleteItemResult> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            results.push(self.delete_one(id).await);
        }
        results
    }
}

/// Выбранные id строк текущей страницы. Не сохраняется.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection(BTreeSet<String>);

impl RowSelection {
    pub fn toggle(&mut self, id: &str, checked: bool) {
        if checked {
            self.0.insert(id.to_string());
        } else {
            self.0.remove(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Чекбокс "выбрать все" в заголовке.
    pub fn set_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>, checked: bool) {
        for id in ids {
            self.toggle(id, checked);
        }
    }

    pub fn all_selected<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> bool {
        let mut any = false;
        for id in ids {
            if !self.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    /// `(id, error)`
    pub failed: Vec<(String, String)>,
}

impl DeleteReport {
    fn from_results(results: Vec<DeleteItemResult>) -> Self {
        let mut report = Self::default();
        for r in results {
            if r.success {
                report.deleted.push(r.id);
            } else {
                let message = r.message.unwrap_or_else(|| "unknown error".to_string());
                report.failed.push((r.id, message));
            }
        }
        report
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Текст баннера со всеми неудалёнными id.
    pub fn failure_message(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        let details = self
            .failed
            .iter()
            .map(|(id, e)| format!("#{id}: {e}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(format!(
            "Failed to delete {} of {} items: {}",
            self.failed.len(),
            self.failed.len() + self.deleted.len(),
            details
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    NothingSelected,
    Declined,
    /// Запросы отправлены, см. [`BulkOutcome::apply`].
    Completed(DeleteReport),
}

/// Реакция экрана списка на завершённое удаление
pub trait DeleteFeedback {
    fn show_error(&self, message: Option<String>);
    fn clear_selection(&self);
    fn reload(&self);
}

impl BulkOutcome {
    /// Для `Completed` обновляет баннер и перечитывает страницу с пустым выбором.
    pub fn apply<F: DeleteFeedback + ?Sized>(&self, feedback: &F) {
        if let BulkOutcome::Completed(report) = self {
            feedback.show_error(report.failure_message());
            feedback.clear_selection();
            feedback.reload();
        }
    }
}

pub struct BulkDeleteDispatcher<'a, C: ?Sized, D: ?Sized> {
    pub confirm: &'a C,
    pub sink: &'a D,
}

impl<C: Confirm + ?Sized, D: DeletionSink + ?Sized> BulkDeleteDispatcher<'_, C, D> {
    pub async fn run(&self, selection: &RowSelection) -> BulkOutcome {
        if selection.is_empty() {
            return BulkOutcome::NothingSelected;
        }
        let message = format!(
            "Delete {} selected item(s)? This cannot be undone.",
            selection.len()
        );
        if !self.confirm.confirm(&message) {
            log::info!("bulk delete declined");
            return BulkOutcome::Declined;
        }

        let results = self.sink.delete_many(&selection.ids()).await;
        let report = DeleteReport::from_results(results);
        if report.has_failures() {
            log::error!(
                "bulk delete: {} deleted, {} failed",
                report.deleted.len(),
                report.failed.len()
            );
        } else {
            log::info!("bulk delete: {} deleted", report.deleted.len());
        }
        BulkOutcome::Completed(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct Answer(bool);

    impl Confirm for Answer {
        fn confirm(&self, _message: &str) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct FakeSink {
        fail: Vec<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl DeletionSink for FakeSink {
        async fn delete_one(&self, id: &str) -> DeleteItemResult {
            self.calls.borrow_mut().push(id.to_string());
            if self.fail.iter().any(|f| *f == id) {
                DeleteItemResult::failed(id, "in use")
            } else {
                DeleteItemResult::ok(id)
            }
        }
    }

    fn selection(ids: &[&str]) -> RowSelection {
        let mut s = RowSelection::default();
        s.set_all(ids.iter().copied(), true);
        s
    }

    #[test]
    fn test_declined_issues_no_request() {
        let sink = FakeSink::default();
        let dispatcher = BulkDeleteDispatcher {
            confirm: &Answer(false),
            sink: &sink,
        };
        let sel = selection(&["1", "2"]);
        assert_eq!(block_on(dispatcher.run(&sel)), BulkOutcome::Declined);
        assert!(sink.calls.borrow().is_empty());
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_empty_selection_does_not_ask() {
        struct Panicking;
        impl Confirm for Panicking {
            fn confirm(&self, _message: &str) -> bool {
                panic!("must not ask");
            }
        }
        let sink = FakeSink::default();
        let dispatcher = BulkDeleteDispatcher {
            confirm: &Panicking,
            sink: &sink,
        };
        assert_eq!(
            block_on(dispatcher.run(&RowSelection::default())),
            BulkOutcome::NothingSelected
        );
    }

    #[test]
    fn test_one_request_per_id_with_per_item_failures() {
        let sink = FakeSink {
            fail: vec!["2"],
            ..FakeSink::default()
        };
        let dispatcher = BulkDeleteDispatcher {
            confirm: &Answer(true),
            sink: &sink,
        };
        let outcome = block_on(dispatcher.run(&selection(&["3", "1", "2"])));

        assert_eq!(*sink.calls.borrow(), vec!["1", "2", "3"]);
        let BulkOutcome::Completed(report) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(report.deleted, vec!["1", "3"]);
        assert_eq!(report.failed, vec![("2".to_string(), "in use".to_string())]);
        assert_eq!(
            report.failure_message().as_deref(),
            Some("Failed to delete 1 of 3 items: #2: in use")
        );
    }

    #[derive(Default)]
    struct RecordingFeedback {
        calls: RefCell<Vec<String>>,
    }

    impl DeleteFeedback for RecordingFeedback {
        fn show_error(&self, message: Option<String>) {
            self.calls
                .borrow_mut()
                .push(format!("error: {}", message.unwrap_or_default()));
        }

        fn clear_selection(&self) {
            self.calls.borrow_mut().push("clear".to_string());
        }

        fn reload(&self) {
            self.calls.borrow_mut().push("reload".to_string());
        }
    }

    #[test]
    fn test_partial_failure_shows_banner_then_clears_and_reloads() {
        let sink = FakeSink {
            fail: vec!["2"],
            ..FakeSink::default()
        };
        let dispatcher = BulkDeleteDispatcher {
            confirm: &Answer(true),
            sink: &sink,
        };
        let feedback = RecordingFeedback::default();
        block_on(dispatcher.run(&selection(&["1", "2"]))).apply(&feedback);

        assert_eq!(
            *feedback.calls.borrow(),
            vec![
                "error: Failed to delete 1 of 2 items: #2: in use",
                "clear",
                "reload"
            ]
        );
    }

    #[test]
    fn test_full_success_clears_previous_banner() {
        let feedback = RecordingFeedback::default();
        BulkOutcome::Completed(DeleteReport {
            deleted: vec!["1".to_string()],
            failed: Vec::new(),
        })
        .apply(&feedback);
        assert_eq!(*feedback.calls.borrow(), vec!["error: ", "clear", "reload"]);
    }

    #[test]
    fn test_declined_leaves_screen_untouched() {
        let feedback = RecordingFeedback::default();
        BulkOutcome::Declined.apply(&feedback);
        BulkOutcome::NothingSelected.apply(&feedback);
        assert!(feedback.calls.borrow().is_empty());
    }

    #[test]
    fn test_selection_select_all() {
        let mut sel = RowSelection::default();
        assert!(!sel.all_selected(["a", "b"]));
        sel.set_all(["a", "b"], true);
        assert!(sel.all_selected(["a", "b"]));
        sel.toggle("a", false);
        assert!(!sel.all_selected(["a", "b"]));
        assert!(!sel.all_selected(std::iter::empty::<&str>()));
    }
}

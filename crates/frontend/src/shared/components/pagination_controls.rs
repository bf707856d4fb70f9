use crate::shared::icons::icon;
use leptos::prelude::*;

pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// `(first, last)` - номера строк страницы с 1; `(0, 0)` для пустой.
pub fn visible_range(page: u32, page_size: u32, total: u64) -> (u64, u64) {
    if total == 0 {
        return (0, 0);
    }
    let first = (page.max(1) as u64 - 1) * page_size as u64 + 1;
    let last = (first + page_size as u64 - 1).min(total);
    (first.min(total), last)
}

/// PaginationControls - переход по страницам и выбор размера страницы
///
/// Страницы нумеруются с 1, как в эндпоинтах коллекций.
#[component]
pub fn PaginationControls(
    /// Текущая страница (с 1)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Всего страниц
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Всего записей по данным сервера
    #[prop(into)]
    total_count: Signal<u64>,

    /// Текущий размер страницы
    #[prop(into)]
    page_size: Signal<u32>,

    /// Смена страницы
    on_page_change: Callback<u32>,

    /// Смена размера страницы
    on_page_size_change: Callback<u32>,

    /// Доступные размеры страницы (по умолчанию 10/25/50/100)
    #[prop(optional)]
    page_size_options: Option<Vec<u32>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| DEFAULT_PAGE_SIZE_OPTIONS.to_vec());
    let is_first = move || current_page.get() <= 1;
    let is_last = move || current_page.get() >= total_pages.get().max(1);

    view! {
        <div class="pagination-controls">
            <span class="pagination-range">
                {move || {
                    let (first, last) = visible_range(current_page.get(), page_size.get(), total_count.get());
                    format!("Showing {} to {} of {} entries", first, last, total_count.get())
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=is_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=is_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {}", current_page.get(), total_pages.get().max(1))}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=is_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=is_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse() {
                        on_page_size_change.run(val);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range() {
        assert_eq!(visible_range(1, 10, 237), (1, 10));
        assert_eq!(visible_range(24, 10, 237), (231, 237));
        assert_eq!(visible_range(1, 10, 0), (0, 0));
    }
}

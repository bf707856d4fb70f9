//! Компонент сортируемой ячейки заголовка таблицы
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Product Name"
//!     sort_field="product_name"
//!     current_sort_field=Signal::derive(move || view_state.with(|s| s.sort.column_accessor.clone()))
//!     sort_direction=Signal::derive(move || view_state.with(|s| s.sort.direction))
//!     on_sort=Callback::new(move |field| toggle_sort(field))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use contracts::shared::list_query::SortDirection;
use leptos::prelude::*;
use thaw::*;

/// Клик по заголовку вызывает `on_sort` с полем колонки; индикатор ▲▼
/// показывает текущее направление активной колонки.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    #[prop(into)]
    sort_field: String,

    /// Текущее поле сортировки из state
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Направление сортировки из state
    #[prop(into)]
    sort_direction: Signal<SortDirection>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field;

    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(sort_field_for_click.clone())
            >
                {label}
                <span class=move || get_sort_class(&current_sort_field.get(), &sort_field_for_class)>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &sort_field_for_indicator,
                            sort_direction.get(),
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}

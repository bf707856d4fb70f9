use leptos::prelude::*;

use crate::shared::components::table::format_number;

/// Строка итогов по суммируемым колонкам
///
/// `cells` идут в порядке видимых колонок: `Some(sum)` для суммируемых,
/// `None` для остальных. Первая несуммируемая ячейка получает подпись.
///
/// # BEM классы
/// - `.table__totals-row` - базовый класс строки итогов
#[component]
pub fn TableTotalsRow(
    #[prop(into)]
    cells: Signal<Vec<Option<f64>>>,
    /// Пустые ячейки слева (чекбокс, раскрытие строки)
    #[prop(optional)]
    leading_cells: usize,
    #[prop(optional, default = "Total")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <tr class="table__totals-row">
            {(0..leading_cells).map(|_| view! { <td></td> }).collect_view()}
            {move || {
                let mut labelled = false;
                cells
                    .get()
                    .into_iter()
                    .map(|cell| match cell {
                        Some(v) => view! {
                            <td class="table__cell--right"><strong>{format_number(v)}</strong></td>
                        }
                        .into_any(),
                        None if !labelled => {
                            labelled = true;
                            view! { <td><strong>{label}</strong></td> }.into_any()
                        }
                        None => view! { <td></td> }.into_any(),
                    })
                    .collect_view()
            }}
        </tr>
    }
}

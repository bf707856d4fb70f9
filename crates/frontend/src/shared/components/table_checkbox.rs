use leptos::prelude::*;

/// Чекбокс выбора строки (`<td>`)
///
/// Клик на чекбокс не вызывает клик на строку (stop_propagation),
/// поэтому раскрытие строки отчёта не срабатывает при выборе.
///
/// # BEM классы
/// - `.table__cell--checkbox` - td обёртка
/// - `.table__checkbox` - input элемент
#[component]
pub fn TableCheckbox(
    /// Сигнал состояния чекбокса
    #[prop(into)]
    checked: Signal<bool>,
    /// Callback вызывается при изменении состояния
    on_change: Callback<bool>,
    /// Отключить чекбокс
    #[prop(optional)]
    disabled: bool,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </td>
    }
}

/// Чекбокс "выбрать все на странице" (`<th>`)
///
/// `checked` истинно, когда выбраны все строки текущей страницы;
/// `indeterminate` - когда выбрана только часть.
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    checked: Signal<bool>,
    #[prop(into)]
    indeterminate: Signal<bool>,
    /// true = выбрать все, false = снять все
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <th class="table__cell table__cell--checkbox">
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:indeterminate=indeterminate
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </th>
    }
}

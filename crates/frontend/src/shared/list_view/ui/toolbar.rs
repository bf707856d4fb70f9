//! Панель управления списком: видимость колонок, фильтр по колонке,
//! фильтры отчёта (дата, период, цена)

use contracts::shared::list_query::DateFilterMode;
use leptos::prelude::*;
use thaw::*;

use super::ScreenState;
use crate::shared::icons::icon;
use crate::shared::list_view::columns::EntityConfig;
use crate::shared::list_view::view_state::{DateRange, PriceRange};

/// Тип `<input>` для значения фильтра даты в выбранном режиме
pub fn date_input_type(mode: DateFilterMode) -> &'static str {
    match mode {
        DateFilterMode::Daily => "date",
        DateFilterMode::Monthly => "month",
        DateFilterMode::Yearly => "number",
    }
}

/// Выпадающий список видимости колонок
#[component]
pub fn ColumnToggle(config: EntityConfig, state: ScreenState) -> impl IntoView {
    let (open, set_open) = signal(false);

    view! {
        <div class="column-toggle">
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| set_open.update(|o| *o = !*o)
            >
                {icon("columns")}
                " Columns "
                {icon("chevron-down")}
            </Button>
            <Show when=move || open.get()>
                <div class="column-toggle__menu">
                    {config
                        .toggleable_columns()
                        .map(|column| {
                            let accessor = column.accessor;
                            view! {
                                <label class="column-toggle__item">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || state.with(|s| !s.state().is_hidden(accessor))
                                        on:change=move |_| state.update(|s| s.toggle_column(accessor))
                                    />
                                    {column.title}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

/// Фильтр по выбранной колонке: select колонки + значение
#[component]
pub fn ColumnFilter(config: EntityConfig, state: ScreenState) -> impl IntoView {
    let filter_value = RwSignal::new(state.with_untracked(|s| s.state().filter_value.clone()));

    Effect::new(move || {
        let v = filter_value.get();
        untrack(move || {
            if state.with(|s| s.state().filter_value != v) {
                state.update(|s| s.set_filter_value(&v));
            }
        });
    });

    view! {
        <Flex gap=FlexGap::Small align=FlexAlign::Center>
            <select
                class="form__select"
                prop:value=move || state.with(|s| s.state().filter_column.clone())
                on:change=move |ev| {
                    let column = event_target_value(&ev);
                    state.update(|s| s.set_filter_column(&column));
                }
            >
                <option value="">"Filter column..."</option>
                {config
                    .filterable_columns()
                    .map(|column| view! { <option value=column.accessor>{column.title}</option> })
                    .collect_view()}
            </select>
            <div style="max-width: 220px;">
                <Input
                    value=filter_value
                    placeholder="Filter value"
                    disabled=Signal::derive(move || state.with(|s| s.state().filter_column.is_empty()))
                />
            </div>
        </Flex>
    }
}

/// Фильтры отчёта: режим даты со значением, период, диапазон цены
#[component]
pub fn ReportFilters(state: ScreenState) -> impl IntoView {
    let mode = Signal::derive(move || state.with(|s| s.state().date_filter_mode));
    let date_range = move || state.with(|s| s.state().date_range.clone());
    let price_range = move || state.with(|s| s.state().price_range.clone());

    let update_range = move |f: fn(&mut DateRange, String), value: String| {
        let mut range = state.with_untracked(|s| s.state().date_range.clone());
        f(&mut range, value);
        state.update(|s| s.set_date_range(range));
    };
    let update_price = move |f: fn(&mut PriceRange, String), value: String| {
        let mut range = state.with_untracked(|s| s.state().price_range.clone());
        f(&mut range, value);
        state.update(|s| s.set_price_range(range));
    };

    view! {
        <div class="report-filters">
            <Flex gap=FlexGap::Medium align=FlexAlign::End>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Date filter:"</Label>
                    <Flex gap=FlexGap::Small>
                        <select
                            class="form__select"
                            prop:value=move || mode.get().as_str()
                            on:change=move |ev| {
                                if let Some(m) = DateFilterMode::parse(&event_target_value(&ev)) {
                                    state.update(|s| s.set_date_filter_mode(m));
                                }
                            }
                        >
                            {DateFilterMode::ALL
                                .iter()
                                .map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
                                .collect_view()}
                        </select>
                        <input
                            class="form__input"
                            type=move || date_input_type(mode.get())
                            placeholder=move || match mode.get() {
                                DateFilterMode::Yearly => "YYYY",
                                _ => "",
                            }
                            prop:value=move || state.with(|s| s.state().date_filter_value.clone())
                            on:change=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| s.set_date_filter_value(&v));
                            }
                        />
                    </Flex>
                </Flex>

                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Date range:"</Label>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <input
                            class="form__input"
                            type="date"
                            prop:value=move || date_range().start
                            on:change=move |ev| update_range(|r, v| r.start = v, event_target_value(&ev))
                        />
                        "—"
                        <input
                            class="form__input"
                            type="date"
                            prop:value=move || date_range().end
                            on:change=move |ev| update_range(|r, v| r.end = v, event_target_value(&ev))
                        />
                    </Flex>
                </Flex>

                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Price range:"</Label>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <input
                            class="form__input"
                            type="number"
                            min="0"
                            placeholder="Min"
                            prop:value=move || price_range().min
                            on:change=move |ev| update_price(|r, v| r.min = v, event_target_value(&ev))
                        />
                        "—"
                        <input
                            class="form__input"
                            type="number"
                            min="0"
                            placeholder="Max"
                            prop:value=move || price_range().max
                            on:change=move |ev| update_price(|r, v| r.max = v, event_target_value(&ev))
                        />
                    </Flex>
                </Flex>
            </Flex>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_input_type_per_mode() {
        assert_eq!(date_input_type(DateFilterMode::Daily), "date");
        assert_eq!(date_input_type(DateFilterMode::Monthly), "month");
        assert_eq!(date_input_type(DateFilterMode::Yearly), "number");
    }
}

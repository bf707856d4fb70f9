//! `EntityList` - общий экран списка сущности
//!
//! Состояние вида хранится в localStorage, страница загружается через
//! [`DataBinder`], выбранные строки удаляются [`BulkDeleteDispatcher`],
//! отчёты выгружаются в PDF/XLSX/CSV.

pub mod cells;
pub mod toolbar;

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::cells::{cell_view, totals_cells, LineItemsTable, TotalSummary};
use self::toolbar::{ColumnFilter, ColumnToggle, ReportFilters};
use super::binder::{DataBinder, GlooDelay};
use super::bulk::{BulkDeleteDispatcher, DeleteFeedback, RowSelection, WindowConfirm};
use super::columns::{ColumnSpec, EntityConfig};
use super::http::HttpCollection;
use super::record::{find_record, ListEntity, MapContext, Record};
use super::storage::{BrowserStorage, Namespace};
use super::totals::column_totals;
use super::view_state::ViewStateStore;
use crate::shared::api_utils::server_base;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::table_checkbox::{TableCheckbox, TableHeaderCheckbox};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::export::download::download;
use crate::shared::export::{build_export, ExportContext, ExportFormat};
use crate::shared::icons::icon;
use crate::shared::list_utils::{capitalize_label, SearchInput};

/// Сохраняемое состояние открытого экрана.
pub type ScreenState = RwSignal<ViewStateStore<BrowserStorage>>;

struct ListFeedback<F> {
    set_error: WriteSignal<Option<String>>,
    selection: RwSignal<RowSelection>,
    reload: F,
}

impl<F: Fn()> DeleteFeedback for ListFeedback<F> {
    fn show_error(&self, message: Option<String>) {
        self.set_error.set(message);
    }

    fn clear_selection(&self) {
        self.selection.update(|s| s.clear());
    }

    fn reload(&self) {
        (self.reload)();
    }
}

fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Список сущности `T` для арендатора `tenant`.
///
/// ```ignore
/// view! { <EntityList<Product> config=PRODUCTS tenant=tenant /> }
/// ```
#[component]
pub fn EntityList<T: ListEntity>(
    config: EntityConfig,
    #[prop(into)]
    tenant: String,
    #[prop(optional)]
    _row: PhantomData<T>,
) -> impl IntoView {
    let state: ScreenState = RwSignal::new(ViewStateStore::open(
        BrowserStorage,
        Namespace::new(&tenant, config.key),
        config.default_page_size,
    ));
    let records = RwSignal::new(Vec::<Record>::new());
    let total_count = RwSignal::new(0u64);
    let last_page = RwSignal::new(1u32);
    let (loading, set_loading) = signal(false);
    let (exporting, set_exporting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let selection = RwSignal::new(RowSelection::default());
    let expanded = RwSignal::new(BTreeSet::<String>::new());

    let binder = StoredValue::new_local(Rc::new(DataBinder::<T, _>::new(
        HttpCollection::new(&tenant, config.collection),
        config.columns,
    )));
    let map_ctx = StoredValue::new(MapContext {
        page: 1,
        page_size: config.default_page_size,
        server_base: server_base(),
        missing_value: config.missing_value,
    });
    let tenant = StoredValue::new(tenant);

    let query = Memo::new(move |_| state.with(|s| s.state().to_query(config.report)));

    let load_items = move || {
        let query = query.get_untracked();
        let binder = binder.get_value();
        let ctx = map_ctx.get_value();
        set_loading.set(true);
        spawn_local(async move {
            match binder.load(&query, &ctx).await {
                Ok(Some(page)) => {
                    records.set(page.records);
                    total_count.set(page.total);
                    last_page.set(page.last_page);
                    set_error.set(None);
                    set_loading.set(false);
                }
                // флагом загрузки управляет более новый запрос
                Ok(None) => {}
                Err(e) => {
                    log::error!("{}: failed to load page {}: {}", config.key, query.page, e);
                    set_error.set(Some(format!("Failed to load {}: {}", config.title, e)));
                    set_loading.set(false);
                }
            }
        });
    };

    Effect::new(move |_| {
        query.track();
        load_items();
    });

    let delete_selected = move || {
        let selected = selection.get_untracked();
        let sink = HttpCollection::new(&tenant.get_value(), config.collection);
        spawn_local(async move {
            let dispatcher = BulkDeleteDispatcher {
                confirm: &WindowConfirm,
                sink: &sink,
            };
            dispatcher.run(&selected).await.apply(&ListFeedback {
                set_error,
                selection,
                reload: load_items,
            });
        });
    };

    let export = move |format: ExportFormat| {
        let binder = binder.get_value();
        let view = state.with_untracked(|s| s.state().clone());
        let map = map_ctx.get_value();
        let tenant_label = capitalize_label(&tenant.get_value());
        set_exporting.set(true);
        spawn_local(async move {
            let hidden = |accessor: &str| view.is_hidden(accessor);
            let ctx = ExportContext {
                config: &config,
                tenant_label: &tenant_label,
                state: &view,
                hidden: &hidden,
                map,
                now: now_utc(),
            };
            let result = build_export(&*binder, &GlooDelay, &ctx, format)
                .await
                .and_then(|file| download(&file));
            if let Err(e) = result {
                log::error!("{}: {} export failed: {}", config.key, format.label(), e);
                set_error.set(Some(format!("Export failed: {}", e)));
            }
            set_exporting.set(false);
        });
    };

    let visible_columns = Memo::new(move |_| {
        state.with(|s| {
            config
                .columns
                .iter()
                .filter(|c| !s.state().is_hidden(c.accessor))
                .collect::<Vec<&'static ColumnSpec>>()
        })
    });
    let has_totals = config.summable_columns().next().is_some();
    let expandable = config.has_line_items();
    let leading_cells = usize::from(config.selectable) + usize::from(expandable);

    let page_ids = move || records.with(|rs| rs.iter().map(|r| r.id.clone()).collect::<Vec<_>>());
    let all_selected = Signal::derive(move || {
        let ids = page_ids();
        selection.with(|s| s.all_selected(ids.iter().map(String::as_str)))
    });
    let some_selected = Signal::derive(move || {
        let ids = page_ids();
        !all_selected.get() && selection.with(|s| ids.iter().any(|id| s.contains(id)))
    });

    let toggle_sort = move |accessor: String| state.update(|s| s.toggle_sort(&accessor));

    view! {
        <div class="page" data-page=config.key>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{config.title}</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                        {move || total_count.get().to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_items()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                    {config.selectable.then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| delete_selected()
                            disabled=Signal::derive(move || selection.with(|s| s.is_empty()))
                        >
                            {icon("trash")}
                            {move || format!(" Delete ({})", selection.with(|s| s.len()))}
                        </Button>
                    })}
                    {config.report.then(|| {
                        ExportFormat::ALL
                            .into_iter()
                            .map(|format| view! {
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=move |_| export(format)
                                    disabled=Signal::derive(move || exporting.get())
                                >
                                    {icon("download")}
                                    {format!(" {}", format.label())}
                                </Button>
                            })
                            .collect_view()
                    })}
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <SearchInput
                                value=Signal::derive(move || state.with(|s| s.state().search.clone()))
                                on_change=Callback::new(move |v: String| state.update(|s| s.set_search(&v)))
                            />
                            <ColumnFilter config=config state=state />
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || state.with(|s| s.state().page))
                                total_pages=Signal::derive(move || last_page.get())
                                total_count=Signal::derive(move || total_count.get())
                                page_size=Signal::derive(move || state.with(|s| s.state().page_size))
                                on_page_change=Callback::new(move |p: u32| state.update(|s| s.set_page(p)))
                                on_page_size_change=Callback::new(move |n: u32| state.update(|s| s.set_page_size(n)))
                            />
                        </div>
                        <div class="filter-panel-header__right">
                            <ColumnToggle config=config state=state />
                        </div>
                    </div>
                    {config.report.then(|| view! {
                        <div class="filter-panel-content">
                            <ReportFilters state=state />
                        </div>
                    })}
                </div>

                {move || error.get().map(|err| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{err}</span>
                    </div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {config.selectable.then(|| view! {
                                    <TableHeaderCheckbox
                                        checked=all_selected
                                        indeterminate=some_selected
                                        on_change=Callback::new(move |checked: bool| {
                                            let ids = page_ids();
                                            selection.update(|s| s.set_all(ids.iter().map(String::as_str), checked));
                                        })
                                    />
                                })}
                                {expandable.then(|| view! { <th class="table__cell--expander"></th> })}
                                {move || visible_columns.get().into_iter().map(|column| {
                                    if column.sortable {
                                        view! {
                                            <SortableHeaderCell
                                                label=column.title
                                                sort_field=column.accessor
                                                current_sort_field=Signal::derive(move || state.with(|s| s.state().sort.column_accessor.clone()))
                                                sort_direction=Signal::derive(move || state.with(|s| s.state().sort.direction))
                                                on_sort=Callback::new(toggle_sort)
                                            />
                                        }.into_any()
                                    } else {
                                        view! {
                                            <TableHeaderCell min_width=60.0>{column.title}</TableHeaderCell>
                                        }.into_any()
                                    }
                                }).collect_view()}
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || records.get()
                                key=|record| record.id.clone()
                                children=move |record: Record| {
                                    let id = record.id.clone();
                                    // строка читается из текущей страницы по id
                                    let record = Memo::new({
                                        let id = id.clone();
                                        move |_| {
                                            records
                                                .with(|rs| find_record(rs, &id).cloned())
                                                .unwrap_or_else(|| record.clone())
                                        }
                                    });
                                    let id_for_check = id.clone();
                                    let id_for_toggle = id.clone();
                                    let id_for_expand = id.clone();
                                    let is_expanded = Memo::new(move |_| expanded.with(|e| e.contains(&id)));

                                    view! {
                                        <TableRow
                                            class=Signal::derive(move || {
                                                if is_expanded.get() { "table__row--expanded".to_string() } else { String::new() }
                                            })
                                            on:click=move |_| {
                                                if expandable {
                                                    let id = id_for_expand.clone();
                                                    expanded.update(|e| {
                                                        if !e.remove(&id) {
                                                            e.insert(id);
                                                        }
                                                    });
                                                }
                                            }
                                        >
                                            {config.selectable.then(|| view! {
                                                <TableCheckbox
                                                    checked=Signal::derive(move || selection.with(|s| s.contains(&id_for_check)))
                                                    on_change=Callback::new(move |checked: bool| {
                                                        selection.update(|s| s.toggle(&id_for_toggle, checked))
                                                    })
                                                />
                                            })}
                                            {expandable.then(|| view! {
                                                <td class="table__cell--expander">
                                                    {move || icon(if is_expanded.get() { "chevron-down" } else { "chevron-right" })}
                                                </td>
                                            })}
                                            {move || {
                                                let tenant = tenant.get_value();
                                                record.with(|r| {
                                                    visible_columns
                                                        .get()
                                                        .into_iter()
                                                        .map(|column| cell_view(&config, column, r, &tenant))
                                                        .collect_view()
                                                })
                                            }}
                                        </TableRow>
                                        <Show when=move || is_expanded.get()>
                                            <tr class="table__row-details">
                                                <td colspan=move || (visible_columns.get().len() + leading_cells).to_string()>
                                                    {move || view! {
                                                        <LineItemsTable items=record.with(|r| r.line_items().to_vec()) />
                                                    }}
                                                </td>
                                            </tr>
                                        </Show>
                                    }
                                }
                            />
                            {has_totals.then(|| view! {
                                <TableTotalsRow
                                    cells=Signal::derive(move || {
                                        let columns = visible_columns.get();
                                        records.with(|rs| totals_cells(rs, &columns))
                                    })
                                    leading_cells=leading_cells
                                />
                            })}
                        </TableBody>
                    </Table>
                </div>

                {(config.report && has_totals).then(|| view! {
                    <TotalSummary totals=Signal::derive(move || {
                        records.with(|rs| {
                            column_totals(rs, config.columns)
                                .into_iter()
                                .map(|(accessor, sum)| {
                                    let title = config.column(accessor).map(|c| c.title).unwrap_or(accessor);
                                    (title, sum)
                                })
                                .collect::<Vec<_>>()
                        })
                    }) />
                })}
            </div>
        </div>
    }
}

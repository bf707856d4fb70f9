//! Отрисовка ячеек, строк позиций заказа и сводки итогов

use contracts::domain::a005_order::aggregate::OrderProduct;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::table::{format_number, format_percent};
use crate::shared::list_view::columns::{ColumnKind, ColumnSpec, EntityConfig};
use crate::shared::list_view::record::{CellValue, Record};
use crate::shared::list_view::totals::sum_column;

/// `/{tenant}/{detail_path}/{id}` для колонок-ссылок.
pub fn detail_href(config: &EntityConfig, column: &ColumnSpec, tenant: &str, id: &str) -> Option<String> {
    if !column.link {
        return None;
    }
    config
        .detail_path
        .map(|path| format!("/{}/{}/{}", tenant, path.trim_matches('/'), id))
}

/// Ячейки строки итогов в порядке видимых колонок.
pub fn totals_cells(records: &[Record], columns: &[&'static ColumnSpec]) -> Vec<Option<f64>> {
    columns
        .iter()
        .map(|c| c.summable.then(|| sum_column(records, c.accessor)))
        .collect()
}

pub fn cell_view(
    config: &EntityConfig,
    column: &'static ColumnSpec,
    record: &Record,
    tenant: &str,
) -> AnyView {
    let cell = record.cell(column.accessor);
    let content = match (column.kind, cell) {
        (ColumnKind::Image { .. }, Some(CellValue::Image(url))) => view! {
            <img class="table__thumb" src=url.clone() alt="" width="40" height="40" />
        }
        .into_any(),
        (_, Some(CellValue::Tags(tags))) => tags
            .iter()
            .map(|t| view! { <span class="tag">{t.clone()}</span> })
            .collect_view()
            .into_any(),
        (_, Some(value @ (CellValue::Number(_) | CellValue::Percent(_) | CellValue::RowNumber(_)))) => {
            view! {
                <span style="font-variant-numeric: tabular-nums;">{value.display()}</span>
            }
            .into_any()
        }
        (_, Some(value)) => {
            let text = value.display();
            match detail_href(config, column, tenant, &record.id) {
                Some(href) => view! { <a class="table__link" href=href>{text}</a> }.into_any(),
                None => text.into_any(),
            }
        }
        (_, None) => config.missing_value.into_any(),
    };

    let class = if column.is_numeric() { "table__cell--right" } else { "" };
    view! {
        <TableCell class=class>
            <TableCellLayout truncate=true>{content}</TableCellLayout>
        </TableCell>
    }
    .into_any()
}

/// Подтаблица позиций заказа в раскрытой строке отчёта
#[component]
pub fn LineItemsTable(items: Vec<OrderProduct>) -> impl IntoView {
    if items.is_empty() {
        return view! { <div class="line-items line-items--empty">"No products"</div> }.into_any();
    }
    view! {
        <table class="line-items">
            <thead>
                <tr>
                    <th>"Product"</th>
                    <th>"Category"</th>
                    <th class="table__cell--right">"Qty"</th>
                    <th class="table__cell--right">"Discount Normal"</th>
                    <th class="table__cell--right">"Discount Member"</th>
                    <th class="table__cell--right">"Total"</th>
                </tr>
            </thead>
            <tbody>
                {items
                    .into_iter()
                    .map(|line| {
                        view! {
                            <tr>
                                <td>{line.product_name().to_string()}</td>
                                <td>{line.category_name().to_string()}</td>
                                <td class="table__cell--right">{format_number(line.quantity)}</td>
                                <td class="table__cell--right">
                                    {format_percent(line.discount_normal.unwrap_or(0.0))}
                                </td>
                                <td class="table__cell--right">
                                    {format_percent(line.discount_member.unwrap_or(0.0))}
                                </td>
                                <td class="table__cell--right">{format_number(line.total)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

/// Панель "Total Summary" отчёта: итог по каждой суммируемой колонке
#[component]
pub fn TotalSummary(
    #[prop(into)]
    totals: Signal<Vec<(&'static str, f64)>>,
) -> impl IntoView {
    view! {
        <div class="total-summary">
            <h3 class="total-summary__title">"Total Summary"</h3>
            <dl class="total-summary__list">
                {move || {
                    totals
                        .get()
                        .into_iter()
                        .map(|(title, value)| {
                            view! {
                                <div class="total-summary__item">
                                    <dt>{title}</dt>
                                    <dd>{format_number(value)}</dd>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </dl>
        </div>
    }
}

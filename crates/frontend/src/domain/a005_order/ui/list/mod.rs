use contracts::domain::a005_order::aggregate::Order;
use leptos::prelude::*;

use crate::shared::list_view::{ColumnSpec, EntityConfig, EntityList, ListEntity, RawValue};

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::row_number(),
    ColumnSpec::text("invoice_no", "Invoice No"),
    ColumnSpec::date_time("order_date", "Order Date"),
    ColumnSpec::text("order_status", "Order Status"),
    ColumnSpec::number("total", "Total"),
    ColumnSpec::text("payment_status", "Payment Status"),
    ColumnSpec::date_time("created_at", "Created At"),
];

pub const ORDERS: EntityConfig = EntityConfig {
    key: "orders",
    title: "Orders",
    collection: "orders",
    columns: COLUMNS,
    default_page_size: 10,
    missing_value: "",
    selectable: true,
    report: false,
    detail_path: None,
};

/// Общая для списка заказов и отчёта по продажам.
impl ListEntity for Order {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn raw(&self, accessor: &str) -> RawValue {
        match accessor {
            "invoice_no" => RawValue::text(self.invoice_no.as_deref()),
            "order_date" => RawValue::text(self.order_date.as_deref()),
            "order_status" => RawValue::text(self.order_status.as_deref()),
            "total_products" => RawValue::number(self.total_products),
            "sub_total" => RawValue::number(self.sub_total),
            "vat" => RawValue::number(self.vat),
            "total" => RawValue::number(self.total),
            "payment_status" => RawValue::text(self.payment_status.as_deref()),
            "pay" => RawValue::number(self.pay),
            "due" => RawValue::number(self.due),
            "pay_return" => RawValue::number(self.pay_return),
            "bank" => RawValue::text(self.bank.as_deref()),
            "no_rekening" => RawValue::text(self.no_rekening.as_deref()),
            "name_rekening" => RawValue::text(self.name_rekening.as_deref()),
            "name_member" => RawValue::text(self.name_member.as_deref()),
            "products" => RawValue::LineItems(self.products.clone()),
            "created_at" => RawValue::text(Some(&self.created_at)),
            _ => RawValue::Missing,
        }
    }
}

#[component]
pub fn OrderList(#[prop(into)] tenant: String) -> impl IntoView {
    view! { <EntityList<Order> config=ORDERS tenant=tenant /> }
}

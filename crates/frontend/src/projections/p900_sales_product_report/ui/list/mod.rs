//! Отчёт по продажам товаров
//!
//! Заказы с позициями, фильтры по дате/периоду/сумме, итоги по денежным
//! колонкам и выгрузка всего отфильтрованного набора в PDF/XLSX/CSV.

use contracts::domain::a005_order::aggregate::Order;
use leptos::prelude::*;

use crate::shared::list_view::{ColumnSpec, EntityConfig, EntityList};

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::row_number(),
    ColumnSpec::date_time("order_date", "Order Date"),
    ColumnSpec::text("order_status", "Order Status"),
    ColumnSpec::number("total_products", "Total Products").summable(),
    ColumnSpec::number("sub_total", "Sub Total").summable(),
    ColumnSpec::number("vat", "VAT").summable(),
    ColumnSpec::text("invoice_no", "Invoice No"),
    ColumnSpec::number("total", "Total").summable(),
    ColumnSpec::text("payment_status", "Payment Status"),
    ColumnSpec::number("pay", "Pay").summable(),
    ColumnSpec::number("due", "Due").summable(),
    ColumnSpec::number("pay_return", "Pay Return"),
    ColumnSpec::text("bank", "Bank"),
    ColumnSpec::text("no_rekening", "No Rekening"),
    ColumnSpec::text("name_rekening", "Name Rekening"),
    ColumnSpec::text("name_member", "Name Member"),
    ColumnSpec::line_items("products", "Products"),
    ColumnSpec::date_time("created_at", "Created At"),
];

pub const SALES_PRODUCT_REPORT: EntityConfig = EntityConfig {
    key: "sales_product_report",
    title: "Sales Product Report",
    collection: "orders-product",
    columns: COLUMNS,
    default_page_size: 10,
    missing_value: "-",
    selectable: false,
    report: true,
    detail_path: None,
};

#[component]
pub fn SalesProductReport(#[prop(into)] tenant: String) -> impl IntoView {
    view! { <EntityList<Order> config=SALES_PRODUCT_REPORT tenant=tenant /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::{render, ExportFormat, ExportJob, FilterSnapshot};
    use crate::shared::list_view::record::{map_rows, CellValue, MapContext};
    use crate::shared::list_view::totals::column_totals;
    use chrono::TimeZone;

    fn orders() -> Vec<Order> {
        serde_json::from_value(serde_json::json!([
            {
                "id": 1,
                "invoice_no": "INV-001",
                "order_date": "2024-03-15",
                "total": 150000,
                "pay": 150000,
                "due": 0,
                "products": [
                    {
                        "product": { "id": 9, "product_name": "Kopi", "category": { "id": 2, "name": "Minuman" } },
                        "quantity": 2,
                        "discount_normal": 5,
                        "total": 100000
                    },
                    { "product": null, "quantity": 1, "total": 50000 }
                ],
                "created_at": "2024-03-15T01:00:00Z"
            },
            {
                "id": 2,
                "invoice_no": "INV-002",
                "total": 25000,
                "created_at": "2024-03-16T01:00:00Z"
            }
        ]))
        .unwrap()
    }

    fn ctx() -> MapContext {
        MapContext {
            page: 1,
            page_size: 10,
            server_base: String::new(),
            missing_value: SALES_PRODUCT_REPORT.missing_value,
        }
    }

    #[test]
    fn test_report_mapping_defaults() {
        let records = map_rows(&orders(), SALES_PRODUCT_REPORT.columns, &ctx());
        let second = &records[1];
        // суммируемые денежные колонки получают 0, остальные "-"
        assert_eq!(second.cell("pay"), Some(&CellValue::Number(0.0)));
        assert_eq!(second.display("bank"), "-");
        assert_eq!(second.display("order_date"), "-");
        assert_eq!(second.display("pay_return"), "-");
        assert!(second.line_items().is_empty());

        let first = &records[0];
        assert_eq!(first.display("order_date"), "15/03/2024");
        assert_eq!(first.line_items().len(), 2);
        assert_eq!(first.line_items()[1].product_name(), "-");
        assert_eq!(first.line_items()[0].category_name(), "Minuman");
        assert_eq!(first.display("products"), "Kopi ×2; - ×1");
    }

    #[test]
    fn test_report_totals() {
        let records = map_rows(&orders(), SALES_PRODUCT_REPORT.columns, &ctx());
        let totals = column_totals(&records, SALES_PRODUCT_REPORT.columns);
        let total = totals.iter().find(|(a, _)| *a == "total").map(|(_, v)| *v);
        assert_eq!(total, Some(175000.0));
        assert!(!totals.iter().any(|(a, _)| *a == "pay_return"));
    }

    #[test]
    fn test_report_csv_export_lists_line_items() {
        let job = ExportJob {
            tenant_label: "Toko Maju".to_string(),
            entity_label: SALES_PRODUCT_REPORT.title.to_string(),
            columns: SALES_PRODUCT_REPORT
                .columns
                .iter()
                .filter(|c| matches!(c.accessor, "no" | "invoice_no" | "total" | "products"))
                .collect(),
            records: map_rows(&orders(), SALES_PRODUCT_REPORT.columns, &ctx()),
            server_total: 2,
            filters: FilterSnapshot::default(),
            generated_at: chrono::Utc.with_ymd_and_hms(2024, 3, 16, 2, 0, 0).unwrap(),
        };
        let file = render(&job, ExportFormat::Csv).unwrap();
        assert_eq!(file.file_name, "Toko_Maju_Sales_Product_Report_20240316_090000.csv");
        let text = String::from_utf8(file.bytes).unwrap();
        assert!(text.contains("INV-001"));
        assert!(text.contains("Kopi ×2; - ×1"));
    }
}

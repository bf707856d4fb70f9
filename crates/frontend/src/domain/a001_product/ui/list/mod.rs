use contracts::domain::a001_product::aggregate::Product;
use leptos::prelude::*;

use crate::shared::list_view::{ColumnSpec, EntityConfig, EntityList, ListEntity, RawValue};

pub const BLANK_PRODUCT_IMAGE: &str = "/assets/images/blank_product.png";

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::row_number(),
    ColumnSpec::text("product_name", "Product Name").linked(),
    ColumnSpec::text("upc_barcode", "UPC Barcode"),
    ColumnSpec::relation("category", "Category"),
    ColumnSpec::relation("supplier", "Supplier"),
    ColumnSpec::text("unit", "Unit"),
    ColumnSpec::image("product_image", "Image", "products", BLANK_PRODUCT_IMAGE),
    ColumnSpec::text("description", "Description"),
    ColumnSpec::percent("discount_normal", "Discount Normal"),
    ColumnSpec::percent("discount_member", "Discount Member"),
    ColumnSpec::date_time("created_at", "Created At"),
];

pub const PRODUCTS: EntityConfig = EntityConfig {
    key: "products",
    title: "Products",
    collection: "products",
    columns: COLUMNS,
    default_page_size: 10,
    missing_value: "",
    selectable: true,
    report: false,
    detail_path: Some("products"),
};

impl ListEntity for Product {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn raw(&self, accessor: &str) -> RawValue {
        match accessor {
            "product_name" => RawValue::Text(self.product_name.clone()),
            "upc_barcode" => RawValue::text(self.upc_barcode.as_deref()),
            "category" => RawValue::text(self.category.as_ref().map(|c| c.name.as_str())),
            "supplier" => RawValue::text(self.supplier.as_ref().map(|s| s.name.as_str())),
            "unit" => RawValue::text(self.unit.as_deref()),
            "product_image" => RawValue::text(self.product_image.as_deref()),
            "description" => RawValue::text(self.description.as_deref()),
            "discount_normal" => RawValue::number(self.discount_normal),
            "discount_member" => RawValue::number(self.discount_member),
            "created_at" => RawValue::text(self.created_at.as_deref()),
            _ => RawValue::Missing,
        }
    }
}

#[component]
pub fn ProductList(#[prop(into)] tenant: String) -> impl IntoView {
    view! { <EntityList<Product> config=PRODUCTS tenant=tenant /> }
}

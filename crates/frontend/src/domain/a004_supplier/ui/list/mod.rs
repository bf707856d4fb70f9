use contracts::domain::a004_supplier::aggregate::Supplier;
use leptos::prelude::*;

use crate::shared::list_view::{ColumnSpec, EntityConfig, EntityList, ListEntity, RawValue};

pub const BLANK_PROFILE_PHOTO: &str = "/assets/images/profile-2.jpeg";

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::row_number(),
    ColumnSpec::text("name", "Name"),
    ColumnSpec::text("email", "Email"),
    ColumnSpec::text("phone", "Phone"),
    ColumnSpec::text("address", "Address"),
    ColumnSpec::image("photo", "Photo", "profile", BLANK_PROFILE_PHOTO),
    ColumnSpec::date_time("created_at", "Created At"),
];

pub const SUPPLIERS: EntityConfig = EntityConfig {
    key: "suppliers",
    title: "Suppliers",
    collection: "suppliers",
    columns: COLUMNS,
    default_page_size: 10,
    missing_value: "",
    selectable: true,
    report: false,
    detail_path: None,
};

impl ListEntity for Supplier {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn raw(&self, accessor: &str) -> RawValue {
        match accessor {
            "name" => RawValue::Text(self.name.clone()),
            "email" => RawValue::text(self.email.as_deref()),
            "phone" => RawValue::text(self.phone.as_deref()),
            "address" => RawValue::text(self.address.as_deref()),
            "photo" => RawValue::text(self.photo.as_deref()),
            "created_at" => RawValue::text(self.created_at.as_deref()),
            _ => RawValue::Missing,
        }
    }
}

#[component]
pub fn SupplierList(#[prop(into)] tenant: String) -> impl IntoView {
    view! { <EntityList<Supplier> config=SUPPLIERS tenant=tenant /> }
}

use contracts::domain::a002_category::aggregate::Category;
use leptos::prelude::*;

use crate::shared::list_view::{ColumnSpec, EntityConfig, EntityList, ListEntity, RawValue};

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::row_number(),
    ColumnSpec::text("name", "Name"),
    ColumnSpec::text("slug", "Slug"),
    ColumnSpec::date_time("created_at", "Created At"),
];

pub const CATEGORIES: EntityConfig = EntityConfig {
    key: "categories",
    title: "Categories",
    collection: "categories",
    columns: COLUMNS,
    default_page_size: 10,
    missing_value: "",
    selectable: true,
    report: false,
    detail_path: None,
};

impl ListEntity for Category {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn raw(&self, accessor: &str) -> RawValue {
        match accessor {
            "name" => RawValue::Text(self.name.clone()),
            "slug" => RawValue::text(self.slug.as_deref()),
            "created_at" => RawValue::text(self.created_at.as_deref()),
            _ => RawValue::Missing,
        }
    }
}

#[component]
pub fn CategoryList(#[prop(into)] tenant: String) -> impl IntoView {
    view! { <EntityList<Category> config=CATEGORIES tenant=tenant /> }
}

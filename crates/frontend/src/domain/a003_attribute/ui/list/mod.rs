use contracts::domain::a003_attribute::aggregate::Attribute;
use leptos::prelude::*;

use crate::shared::list_view::{ColumnSpec, EntityConfig, EntityList, ListEntity, RawValue};

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::row_number(),
    ColumnSpec::text("name", "Name"),
    ColumnSpec::tags("values", "Values"),
    ColumnSpec::date_time("created_at", "Created At"),
];

pub const ATTRIBUTES: EntityConfig = EntityConfig {
    key: "attributes",
    title: "Attributes",
    collection: "attributes",
    columns: COLUMNS,
    default_page_size: 10,
    missing_value: "",
    selectable: true,
    report: false,
    detail_path: None,
};

impl ListEntity for Attribute {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn raw(&self, accessor: &str) -> RawValue {
        match accessor {
            "name" => RawValue::Text(self.name.clone()),
            "values" => RawValue::Tags(self.values.iter().map(|v| v.value.clone()).collect()),
            "created_at" => RawValue::text(Some(&self.created_at)),
            _ => RawValue::Missing,
        }
    }
}

#[component]
pub fn AttributeList(#[prop(into)] tenant: String) -> impl IntoView {
    view! { <EntityList<Attribute> config=ATTRIBUTES tenant=tenant /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::record::{map_rows, CellValue, MapContext};

    #[test]
    fn test_values_become_tags() {
        let attribute: Attribute = serde_json::from_value(serde_json::json!({
            "id": 5,
            "name": "Size",
            "values": [{ "id": 1, "value": "S" }, { "value": "M" }],
            "created_at": "2024-01-02 03:04:05"
        }))
        .unwrap();
        let ctx = MapContext {
            page: 1,
            page_size: 10,
            server_base: String::new(),
            missing_value: "",
        };

        let records = map_rows(&[attribute], ATTRIBUTES.columns, &ctx);
        assert_eq!(
            records[0].cell("values"),
            Some(&CellValue::Tags(vec!["S".to_string(), "M".to_string()]))
        );
        assert_eq!(records[0].display("values"), "S, M");
        assert_eq!(records[0].display("created_at"), "02/01/2024, 10.04.05");
    }
}

use serde::{Deserialize, Serialize};

/// Атрибут товара (размер, цвет, ...) со списком допустимых значений.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(default)]
    pub id: Option<i64>,
    pub value: String,
}

use serde::{Deserialize, Serialize};

use crate::domain::a002_category::aggregate::Category;
use crate::domain::a004_supplier::aggregate::Supplier;

/// Товар магазина, как его отдаёт коллекция `products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    #[serde(default)]
    pub upc_barcode: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub supplier: Option<Supplier>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Абсолютный URL или имя файла в папке storage сервера.
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_normal: Option<f64>,
    #[serde(default)]
    pub discount_member: Option<f64>,
    /// Отсутствует у товаров внутри позиций заказа.
    #[serde(default)]
    pub created_at: Option<String>,
}

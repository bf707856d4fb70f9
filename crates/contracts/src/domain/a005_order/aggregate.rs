use serde::{Deserialize, Serialize};

use crate::domain::a001_product::aggregate::Product;

/// Заказ вместе со строками товаров (используется и в отчёте по продажам).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub total_products: Option<f64>,
    #[serde(default)]
    pub sub_total: Option<f64>,
    #[serde(default)]
    pub vat: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub pay: Option<f64>,
    #[serde(default)]
    pub due: Option<f64>,
    #[serde(default)]
    pub pay_return: Option<f64>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub no_rekening: Option<String>,
    #[serde(default)]
    pub name_rekening: Option<String>,
    #[serde(default)]
    pub name_member: Option<String>,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
    pub created_at: String,
}

/// Позиция заказа.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub discount_normal: Option<f64>,
    #[serde(default)]
    pub discount_member: Option<f64>,
    #[serde(default)]
    pub total: f64,
}

impl OrderProduct {
    pub fn product_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.product_name.as_str())
            .unwrap_or("-")
    }

    pub fn category_name(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.category.as_ref())
            .map(|c| c.name.as_str())
            .unwrap_or("-")
    }
}

use serde::{Deserialize, Serialize};

/// Запрос на оформление оплаты через платёжный шлюз.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Если не задан, генерируется на сервере.
    #[serde(default)]
    pub order_id: Option<String>,
    pub customer: CheckoutCustomer,
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutCustomer {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub id: String,
    pub name: String,
    /// Цена за единицу в минимальных единицах валюты шлюза (IDR).
    pub price: i64,
    pub quantity: i64,
}

impl CheckoutRequest {
    /// Σ price × quantity по корзине; `None` при переполнении `i64`.
    pub fn gross_amount(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |sum, i| sum.checked_add(i.price.checked_mul(i.quantity)?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub token: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gross_amount_from_items() {
        let request: CheckoutRequest = serde_json::from_str(
            r#"{
                "customer": {"first_name": "Budi", "email": "budi@example.com"},
                "items": [
                    {"id": "p1", "name": "Kopi", "price": 15000, "quantity": 2},
                    {"id": "p2", "name": "Teh", "price": 5000, "quantity": 1}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(request.order_id, None);
        assert_eq!(request.customer.last_name, None);
        assert_eq!(request.gross_amount(), Some(35000));
    }

    #[test]
    fn test_gross_amount_overflow_is_none() {
        let item = |price: i64, quantity: i64| CheckoutItem {
            id: "p1".to_string(),
            name: "Kopi".to_string(),
            price,
            quantity,
        };
        let mut request = CheckoutRequest {
            order_id: None,
            customer: CheckoutCustomer {
                first_name: "Budi".to_string(),
                last_name: None,
                email: "budi@example.com".to_string(),
                phone: None,
            },
            items: vec![item(4611686018427387904, 2)],
        };
        assert_eq!(request.gross_amount(), None);

        request.items = vec![item(i64::MAX, 1), item(1, 1)];
        assert_eq!(request.gross_amount(), None);

        request.items = vec![item(i64::MAX, 1)];
        assert_eq!(request.gross_amount(), Some(i64::MAX));
    }
}

use std::sync::Arc;

use contracts::usecases::u601_checkout::request::{CheckoutRequest, CheckoutResponse};
use thiserror::Error;

use super::gateway_client::{
    CreditCard, CustomerDetails, GatewayError, ItemDetails, PaymentGateway, SnapTransaction,
    TransactionDetails,
};
use crate::shared::config::PaymentConfig;

// Лимиты полей Snap API при is_sanitized = true
const MAX_ITEM_ID: usize = 50;
const MAX_ITEM_NAME: usize = 50;
const MAX_NAME: usize = 20;
const MAX_EMAIL: usize = 45;
const MAX_PHONE: usize = 19;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Проверка корзины и клиента до обращения к шлюзу. Возвращает сумму заказа.
pub fn validate(request: &CheckoutRequest) -> Result<i64, CheckoutError> {
    if request.items.is_empty() {
        return Err(CheckoutError::Invalid("cart is empty".to_string()));
    }
    if request.customer.email.trim().is_empty() {
        return Err(CheckoutError::Invalid("customer email is required".to_string()));
    }
    for item in &request.items {
        if item.quantity <= 0 {
            return Err(CheckoutError::Invalid(format!(
                "item {} has non-positive quantity {}",
                item.id, item.quantity
            )));
        }
        if item.price <= 0 {
            return Err(CheckoutError::Invalid(format!(
                "item {} has non-positive price {}",
                item.id, item.price
            )));
        }
    }
    request
        .gross_amount()
        .ok_or_else(|| CheckoutError::Invalid("cart total overflows".to_string()))
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn sanitize_phone(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .take(MAX_PHONE)
        .collect()
}

/// Собирает тело транзакции. `gross_amount` берётся из [`validate`].
pub fn build_transaction(
    request: &CheckoutRequest,
    order_id: String,
    gross_amount: i64,
    config: &PaymentConfig,
) -> SnapTransaction {
    let sanitize = config.is_sanitized;
    let text = |value: &str, max: usize| {
        if sanitize {
            truncate(value, max)
        } else {
            value.to_string()
        }
    };

    let customer = &request.customer;
    SnapTransaction {
        transaction_details: TransactionDetails {
            order_id,
            gross_amount,
        },
        item_details: request
            .items
            .iter()
            .map(|item| ItemDetails {
                id: text(&item.id, MAX_ITEM_ID),
                price: item.price,
                quantity: item.quantity,
                name: text(&item.name, MAX_ITEM_NAME),
            })
            .collect(),
        customer_details: CustomerDetails {
            first_name: text(&customer.first_name, MAX_NAME),
            last_name: customer.last_name.as_deref().map(|v| text(v, MAX_NAME)),
            email: text(customer.email.trim(), MAX_EMAIL),
            phone: customer.phone.as_deref().map(|v| {
                if sanitize {
                    sanitize_phone(v)
                } else {
                    v.to_string()
                }
            }),
        },
        credit_card: CreditCard {
            secure: config.is_3ds,
        },
    }
}

pub struct CheckoutExecutor {
    gateway: Arc<dyn PaymentGateway>,
    config: PaymentConfig,
}

impl CheckoutExecutor {
    pub fn new(gateway: Arc<dyn PaymentGateway>, config: PaymentConfig) -> Self {
        Self { gateway, config }
    }

    pub async fn execute(&self, request: CheckoutRequest) -> Result<CheckoutResponse, CheckoutError> {
        let gross_amount = validate(&request)?;

        let order_id = request
            .order_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let transaction = build_transaction(&request, order_id.clone(), gross_amount, &self.config);

        let token = self.gateway.create_transaction(&transaction).await?;
        tracing::info!("Checkout {}: token issued", order_id);

        Ok(CheckoutResponse {
            order_id,
            token: token.token,
            redirect_url: token.redirect_url,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::usecases::u601_checkout::gateway_client::SnapToken;
    use async_trait::async_trait;
    use contracts::usecases::u601_checkout::request::{CheckoutCustomer, CheckoutItem};
    use std::sync::Mutex;

    /// Шлюз-заглушка: запоминает транзакции, отвечает фиксированным токеном
    #[derive(Default)]
    pub(crate) struct FakeGateway {
        pub sent: Mutex<Vec<SnapTransaction>>,
        pub reject: bool,
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_transaction(
            &self,
            transaction: &SnapTransaction,
        ) -> Result<SnapToken, GatewayError> {
            self.sent.lock().unwrap().push(transaction.clone());
            if self.reject {
                return Err(GatewayError::Rejected {
                    status: 401,
                    message: "Access denied".to_string(),
                });
            }
            Ok(SnapToken {
                token: "tok-123".to_string(),
                redirect_url: "https://app.sandbox.midtrans.com/snap/v2/vtweb/tok-123".to_string(),
            })
        }
    }

    pub(crate) fn payment_config() -> PaymentConfig {
        PaymentConfig {
            server_key: "SB-key".to_string(),
            is_production: false,
            is_sanitized: true,
            is_3ds: true,
        }
    }

    pub(crate) fn sample_request() -> CheckoutRequest {
        CheckoutRequest {
            order_id: Some("INV-001".to_string()),
            customer: CheckoutCustomer {
                first_name: "Budi".to_string(),
                last_name: Some("Santoso".to_string()),
                email: "budi@example.com".to_string(),
                phone: Some("+62 812-3456-7890".to_string()),
            },
            items: vec![
                CheckoutItem {
                    id: "p1".to_string(),
                    name: "Kopi".to_string(),
                    price: 15000,
                    quantity: 2,
                },
                CheckoutItem {
                    id: "p2".to_string(),
                    name: "Teh".to_string(),
                    price: 5000,
                    quantity: 1,
                },
            ],
        }
    }

    #[test]
    fn test_validate_rejects_bad_carts() {
        let mut empty = sample_request();
        empty.items.clear();
        assert!(matches!(validate(&empty), Err(CheckoutError::Invalid(_))));

        let mut zero_qty = sample_request();
        zero_qty.items[0].quantity = 0;
        assert!(matches!(validate(&zero_qty), Err(CheckoutError::Invalid(_))));

        let mut negative_price = sample_request();
        negative_price.items[1].price = -1;
        assert!(matches!(validate(&negative_price), Err(CheckoutError::Invalid(_))));

        let mut no_email = sample_request();
        no_email.customer.email = "  ".to_string();
        assert!(matches!(validate(&no_email), Err(CheckoutError::Invalid(_))));

        assert_eq!(validate(&sample_request()).unwrap(), 35000);
    }

    #[test]
    fn test_validate_rejects_overflowing_total() {
        let mut request = sample_request();
        request.items[0].price = 4611686018427387904;
        request.items[0].quantity = 2;
        match validate(&request) {
            Err(CheckoutError::Invalid(message)) => assert_eq!(message, "cart total overflows"),
            other => panic!("expected invalid cart, got {other:?}"),
        }
    }

    #[test]
    fn test_build_transaction_sums_items() {
        let request = sample_request();
        let gross = validate(&request).unwrap();
        let tx = build_transaction(&request, "INV-001".to_string(), gross, &payment_config());
        assert_eq!(tx.transaction_details.gross_amount, 35000);
        assert_eq!(tx.item_details.len(), 2);
        assert!(tx.credit_card.secure);
        assert_eq!(tx.customer_details.phone.as_deref(), Some("+6281234567890"));
    }

    #[test]
    fn test_build_transaction_sanitizes_long_fields() {
        let mut request = sample_request();
        request.customer.first_name = "A".repeat(30);
        request.items[0].name = "N".repeat(80);

        let tx = build_transaction(&request, "X".to_string(), 1, &payment_config());
        assert_eq!(tx.customer_details.first_name.chars().count(), 20);
        assert_eq!(tx.item_details[0].name.chars().count(), 50);

        let raw = PaymentConfig {
            is_sanitized: false,
            ..payment_config()
        };
        let tx = build_transaction(&request, "X".to_string(), 1, &raw);
        assert_eq!(tx.customer_details.first_name.chars().count(), 30);
        assert_eq!(tx.customer_details.phone.as_deref(), Some("+62 812-3456-7890"));
    }

    #[tokio::test]
    async fn test_execute_generates_order_id_when_absent() {
        let gateway = Arc::new(FakeGateway::default());
        let executor = CheckoutExecutor::new(gateway.clone(), payment_config());
        let mut request = sample_request();
        request.order_id = None;

        let response = executor.execute(request).await.unwrap();
        assert_eq!(response.token, "tok-123");
        assert!(uuid::Uuid::parse_str(&response.order_id).is_ok());

        let sent = gateway.sent.lock().unwrap();
        assert_eq!(sent[0].transaction_details.order_id, response.order_id);
    }

    #[tokio::test]
    async fn test_execute_skips_gateway_for_invalid_request() {
        let gateway = Arc::new(FakeGateway::default());
        let executor = CheckoutExecutor::new(gateway.clone(), payment_config());
        let mut request = sample_request();
        request.items.clear();

        let result = executor.execute(request).await;
        assert!(matches!(result, Err(CheckoutError::Invalid(_))));
        assert!(gateway.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_propagates_gateway_rejection() {
        let gateway = Arc::new(FakeGateway {
            reject: true,
            ..Default::default()
        });
        let executor = CheckoutExecutor::new(gateway, payment_config());

        let result = executor.execute(sample_request()).await;
        assert!(matches!(
            result,
            Err(CheckoutError::Gateway(GatewayError::Rejected { status: 401, .. }))
        ));
    }
}

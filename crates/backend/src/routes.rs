use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::usecases::u601_checkout::CheckoutExecutor;

#[derive(Clone)]
pub struct AppState {
    pub checkout: Arc<CheckoutExecutor>,
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // U601 Checkout (токен страницы оплаты)
        .route("/api/checkout", post(handlers::u601_checkout::checkout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u601_checkout::executor::tests::{
        payment_config, sample_request, FakeGateway,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use contracts::usecases::u601_checkout::request::{CheckoutErrorResponse, CheckoutResponse};
    use tower::ServiceExt;

    fn app(gateway: FakeGateway) -> Router {
        app_with(Arc::new(gateway))
    }

    fn app_with(gateway: Arc<FakeGateway>) -> Router {
        let executor = CheckoutExecutor::new(gateway, payment_config());
        configure_routes(AppState {
            checkout: Arc::new(executor),
        })
    }

    fn post_json(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/checkout")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(FakeGateway::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_checkout_returns_token() {
        let body = serde_json::to_string(&sample_request()).unwrap();
        let response = app(FakeGateway::default()).oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: CheckoutResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.order_id, "INV-001");
        assert_eq!(parsed.token, "tok-123");
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_is_unprocessable() {
        let mut request = sample_request();
        request.items.clear();
        let body = serde_json::to_string(&request).unwrap();

        let response = app(FakeGateway::default()).oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: CheckoutErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.message, "cart is empty");
    }

    #[tokio::test]
    async fn test_checkout_overflowing_total_is_unprocessable() {
        let mut request = sample_request();
        request.items[0].price = 4611686018427387904;
        request.items[0].quantity = 2;
        let body = serde_json::to_string(&request).unwrap();
        let gateway = Arc::new(FakeGateway::default());

        let response = app_with(gateway.clone()).oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(gateway.sent.lock().unwrap().is_empty());

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: CheckoutErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.message, "cart total overflows");
    }

    #[tokio::test]
    async fn test_checkout_gateway_failure_is_bad_gateway() {
        let gateway = FakeGateway {
            reject: true,
            ..Default::default()
        };
        let body = serde_json::to_string(&sample_request()).unwrap();

        let response = app(gateway).oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

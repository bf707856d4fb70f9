use axum::{extract::State, http::StatusCode, Json};
use contracts::usecases::u601_checkout::request::{
    CheckoutErrorResponse, CheckoutRequest, CheckoutResponse,
};

use crate::routes::AppState;
use crate::usecases::u601_checkout::CheckoutError;

/// POST /api/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<CheckoutErrorResponse>)> {
    match state.checkout.execute(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let status = match &e {
                CheckoutError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::Gateway(_) => StatusCode::BAD_GATEWAY,
            };
            tracing::error!("Checkout failed ({}): {}", status.as_u16(), e);
            Err((
                status,
                Json(CheckoutErrorResponse {
                    message: e.to_string(),
                }),
            ))
        }
    }
}

//! HTTP Handlers

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use invoice_relay::{InvoiceRequest, RelayResponse};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub token_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        token_configured: state.relay.config().token_configured(),
    })
}

/// Create an invoice through the relay
///
/// The body is parsed leniently: anything that is not a JSON object falls
/// back to the default price and currency.
pub async fn create_invoice(State(state): State<AppState>, body: Bytes) -> Response {
    let request = InvoiceRequest::from_body(&body);
    tracing::info!(price = %request.price, currency = %request.currency, "Invoice requested");

    relay_response(state.relay.create_invoice(request).await)
}

/// Bare `OPTIONS` on the invoice route
pub async fn invoice_preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on the invoice route
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".into(),
        }),
    )
}

fn relay_response(response: RelayResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

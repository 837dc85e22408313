//! Invoice relay HTTP server
//!
//! Axum-based server that forwards invoice requests from the widget harness
//! to BitPay, attaching the merchant token held in the environment.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoice_relay::{HttpInvoiceProvider, InvoiceRelay, RelayConfig};

use crate::handlers::{create_invoice, health_check, invoice_preflight, method_not_allowed};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = RelayConfig::from_env();

    if config.token_configured() {
        tracing::info!("✓ BitPay token configured");
    } else {
        tracing::warn!("⚠ BitPay token not configured - invoice creation will fail");
        tracing::warn!("  Set BITPAY_API_TOKEN in .env");
    }
    tracing::info!("Provider endpoint: {}", config.invoices_url());

    let provider = Arc::new(HttpInvoiceProvider::new(&config.api_base));
    let state = AppState::new(InvoiceRelay::new(provider, config));

    // Built harness page (trunk output), served same-origin with the relay
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 invoice relay running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health       - Health check");
    tracing::info!("  POST /api/invoices - Create BitPay invoice");
    tracing::info!("  GET  /*            - Harness page from {}/", static_dir);
    tracing::info!("");

    axum::serve(listener, app(state, Some(&static_dir))).await?;

    Ok(())
}

/// Build the router
///
/// With `static_dir`, unmatched paths are served from that directory.
pub fn app(state: AppState, static_dir: Option<&str>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/invoices",
            post(create_invoice)
                .options(invoice_preflight)
                .fallback(method_not_allowed),
        );

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

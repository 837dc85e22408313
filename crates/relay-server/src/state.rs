//! Application State

use std::sync::Arc;

use invoice_relay::InvoiceRelay;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Invoice relay (owns the provider transport and the API token)
    pub relay: Arc<InvoiceRelay>,
}

impl AppState {
    pub fn new(relay: InvoiceRelay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

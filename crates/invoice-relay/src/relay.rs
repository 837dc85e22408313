//! Invoice Relay
//!
//! One request in, one provider call out, one response back. No caching,
//! no retries: two identical calls create two invoices.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::provider::{InvoiceProvider, ProviderReply};
use crate::request::{InvoiceRequest, ProviderInvoiceBody};

/// What the relay hands back to its caller
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RelayResponse {
    /// HTTP status to answer with
    pub status: u16,

    /// JSON body to answer with
    pub body: Value,
}

impl RelayResponse {
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// `500` with the caller-safe message of `err`
    pub fn from_error(err: &RelayError) -> Self {
        Self::new(500, json!({ "error": err.user_message() }))
    }
}

/// Relay between callers and the provider
pub struct InvoiceRelay {
    provider: Arc<dyn InvoiceProvider>,
    config: RelayConfig,
}

impl InvoiceRelay {
    pub fn new(provider: Arc<dyn InvoiceProvider>, config: RelayConfig) -> Self {
        Self { provider, config }
    }

    pub const fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Create an invoice on behalf of a caller
    ///
    /// Never fails: every outcome is expressed as a status and body.
    pub async fn create_invoice(&self, request: InvoiceRequest) -> RelayResponse {
        let Some(token) = self.config.token.as_ref() else {
            let err = RelayError::Config("BITPAY_API_TOKEN environment variable not set".into());
            tracing::error!("{}", err);
            return RelayResponse::from_error(&err);
        };

        let body = ProviderInvoiceBody::build(request, token, &self.config);

        match self.forward(&body).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Invoice creation failed: {}", err);
                RelayResponse::from_error(&err)
            }
        }
    }

    async fn forward(&self, body: &ProviderInvoiceBody) -> Result<RelayResponse> {
        let reply = self.provider.post_invoice(body).await?;

        if reply.is_success() {
            let data = serde_json::from_str::<Value>(&reply.body)
                .map_err(|e| RelayError::MalformedResponse(e.to_string()))?;
            return Ok(RelayResponse::new(200, data));
        }

        let data = parse_error_body(&reply);
        tracing::error!(status = reply.status, body = %data, "BitPay API error");
        Ok(RelayResponse::new(reply.status, data))
    }
}

/// Best-effort parse of a provider error body
fn parse_error_body(reply: &ProviderReply) -> Value {
    serde_json::from_str(&reply.body).unwrap_or_else(|_| json!({}))
}

//! Invoice Request and Relay Results

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Price/currency form state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub price: String,
    pub currency: String,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        Self {
            price: "1".into(),
            currency: "USD".into(),
        }
    }
}

impl InvoiceForm {
    /// JSON body for the relay
    ///
    /// A blank field is left out so the relay applies its default. A price
    /// that does not parse as a number is sent as typed.
    pub fn to_request_body(&self) -> Value {
        let mut body = json!({});
        let price = self.price.trim();
        if !price.is_empty() {
            body["price"] = price
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map_or_else(|| Value::from(price), Value::Number);
        }
        let currency = self.currency.trim();
        if !currency.is_empty() {
            body["currency"] = Value::from(currency);
        }
        body
    }
}

/// Why a relay call produced no invoice
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RelayFailure {
    /// Relay answered with a non-2xx status
    #[error("Relay returned status {status}")]
    Provider { status: u16, message: Option<String> },

    /// Request never got an answer
    #[error("Request failed: {0}")]
    Transport(String),
}

impl RelayFailure {
    /// Build from a non-2xx status and whatever body came with it
    pub fn from_error_body(status: u16, body: &Value) -> Self {
        Self::Provider {
            status,
            message: body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Provider-supplied message if present, else the transport text
    pub fn display_message(&self) -> String {
        match self {
            Self::Provider {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Provider {
                status,
                message: None,
            } => format!("Request failed with status code {status}"),
            Self::Transport(text) => text.clone(),
        }
    }
}

/// Invoice id at `data.id`
pub fn extract_invoice_id(body: &Value) -> Option<&str> {
    body.get("data")?
        .get("id")?
        .as_str()
        .filter(|id| !id.is_empty())
}

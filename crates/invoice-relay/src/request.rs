//! Invoice Request Types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{ApiToken, RelayConfig};

/// Invoice request as sent by the harness
///
/// Values are kept as raw JSON and forwarded untouched. Only absent keys are
/// defaulted; an explicit `null` stays `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub price: Value,
    pub currency: Value,
}

impl Default for InvoiceRequest {
    fn default() -> Self {
        Self {
            price: Value::from(1),
            currency: Value::from("USD"),
        }
    }
}

impl InvoiceRequest {
    pub fn new(price: impl Into<Value>, currency: impl Into<Value>) -> Self {
        Self {
            price: price.into(),
            currency: currency.into(),
        }
    }

    /// Parse a raw request body
    ///
    /// An empty body, invalid JSON or a non-object body all yield the defaults.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Self::from_map(&map),
            _ => Self::default(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            price: map.get("price").cloned().unwrap_or(defaults.price),
            currency: map.get("currency").cloned().unwrap_or(defaults.currency),
        }
    }
}

/// Body posted to `<api_base>/invoices`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInvoiceBody {
    pub price: Value,
    pub currency: Value,
    pub token: String,
    #[serde(rename = "redirectURL")]
    pub redirect_url: String,
    pub auto_redirect: bool,
}

impl ProviderInvoiceBody {
    /// Merge a caller request with the server-held token and redirect settings
    pub fn build(request: InvoiceRequest, token: &ApiToken, config: &RelayConfig) -> Self {
        Self {
            price: request.price,
            currency: request.currency,
            token: token.expose().to_string(),
            redirect_url: config.redirect_url.clone(),
            auto_redirect: config.auto_redirect,
        }
    }
}

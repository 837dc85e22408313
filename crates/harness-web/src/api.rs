//! Relay Client

use serde_json::Value;
use widget_harness::{InvoiceForm, RelayFailure};

/// Ask the relay for a new invoice
///
/// Returns the relay's body on 2xx. Anything else carries the relay's
/// `error` field when there is one.
pub async fn create_invoice(relay_url: &str, form: &InvoiceForm) -> Result<Value, RelayFailure> {
    let client = reqwest::Client::new();

    let response = client
        .post(relay_url)
        .json(&form.to_request_body())
        .send()
        .await
        .map_err(|e| RelayFailure::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        response
            .json::<Value>()
            .await
            .map_err(|e| RelayFailure::Transport(e.to_string()))
    } else {
        let data: Value = response.json().await.unwrap_or_default();
        Err(RelayFailure::from_error_body(status.as_u16(), &data))
    }
}

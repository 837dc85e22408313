//! Error Types

use thiserror::Error;

use crate::invoice::RelayFailure;

/// Result type alias for harness actions
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Harness error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// `window.bitpay` has not loaded yet
    #[error("BitPay widget is not loaded")]
    WidgetNotLoaded,

    /// A create action is already waiting on the relay
    #[error("An invoice request is already in progress")]
    RequestInProgress,

    /// A relay answer arrived with no create action waiting for it
    #[error("No invoice request is in progress")]
    NoRequestInProgress,

    /// Open-existing was triggered without an id
    #[error("No invoice id to open")]
    EmptyInvoiceId,

    /// Relay answered 2xx without `data.id`
    #[error("Response did not contain an invoice id")]
    MissingInvoiceId,

    /// Relay call failed
    #[error("{}", .0.display_message())]
    Relay(#[from] RelayFailure),
}

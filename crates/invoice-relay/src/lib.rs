//! # invoice-relay
//!
//! Single-hop relay between the widget harness and BitPay's invoice API.
//!
//! ## Flow
//!
//! ```text
//! ┌───────────┐  {price, currency}  ┌──────────────┐  + token, redirect  ┌──────────┐
//! │  Harness  │────────────────────▶│ InvoiceRelay │────────────────────▶│  BitPay  │
//! │ (browser) │◀────────────────────│              │◀────────────────────│ /invoices│
//! └───────────┘  body + status      └──────────────┘  body + status      └──────────┘
//! ```
//!
//! The relay owns the API token. Callers never send it and never see it:
//! provider successes come back verbatim with `200`, provider errors come back
//! with the provider's status, and transport failures collapse to a fixed
//! `500` body while the real cause goes to the log.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use invoice_relay::{HttpInvoiceProvider, InvoiceRelay, InvoiceRequest, RelayConfig};
//!
//! let config = RelayConfig::from_env();
//! let provider = Arc::new(HttpInvoiceProvider::new(&config.api_base));
//! let relay = InvoiceRelay::new(provider, config);
//!
//! let response = relay.create_invoice(InvoiceRequest::default()).await;
//! // response.status, response.body
//! ```

mod config;
mod error;
mod provider;
mod relay;
mod request;

pub use config::{ApiToken, RelayConfig};
pub use error::{RelayError, Result};
pub use provider::{HttpInvoiceProvider, InvoiceProvider, ProviderReply};
pub use relay::{InvoiceRelay, RelayResponse};
pub use request::{InvoiceRequest, ProviderInvoiceBody};

//! # widget-harness
//!
//! State and rules for the BitPay widget test page, independent of the
//! browser. The web front-end owns one [`Harness`] and feeds it user actions,
//! relay results, widget callbacks and cross-origin messages.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  create / open / clear   ┌──────────────────────────────┐
//! │   Page UI    │─────────────────────────▶│           Harness            │
//! └──────────────┘                          │  ┌──────────┐ ┌───────────┐  │
//! ┌──────────────┐  callbacks               │  │ EventLog │ │ Received  │  │
//! │    Widget    │─────────────────────────▶│  └──────────┘ └───────────┘  │
//! │  (bitpay.js) │◀─────── show_invoice ────│         Phase, invoice id    │
//! └──────────────┘                          └──────────────────────────────┘
//! ┌──────────────┐  postMessage (trusted origins only)   ▲
//! │ widget frame │────────────────────────────────────────┘
//! └──────────────┘
//! ```
//!
//! The [`Widget`] trait is the only thing the harness knows about the vendor
//! script, so the whole state machine runs in plain unit tests. Transitions
//! that open an invoice return its id; the caller shows it once the harness
//! is no longer borrowed, since the widget calls back in synchronously.

pub mod config;
pub mod error;
pub mod event;
pub mod harness;
pub mod invoice;
pub mod widget;

pub use config::{HarnessConfig, Mode, PROVIDER_ORIGIN};
pub use error::{HarnessError, Result};
pub use event::{ChecklistItem, EXPECTED_EVENTS, EventLog, EventRecord, ReceivedEvents};
pub use harness::{Harness, Phase};
pub use invoice::{InvoiceForm, RelayFailure, extract_invoice_id};
pub use widget::{Widget, WidgetCallback, register_callbacks};

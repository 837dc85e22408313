//! BitPay widget test page
//!
//! Leptos-based WASM front-end. It creates invoices through the relay, opens
//! them with `window.bitpay`, and logs what the widget reports back.

mod api;
mod app;
mod components;
mod listener;
mod pages;
mod widget;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    // Harness tracing (invoice created, relay errors) goes to the console
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(App);
}

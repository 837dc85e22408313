//! Widget Test Page

use std::time::Duration;

use leptos::prelude::*;
use widget_harness::{Harness, HarnessConfig, InvoiceForm, Widget, register_callbacks};

use crate::api;
use crate::components::{ChecklistRow, EventRow};
use crate::listener::listen_for_messages;
use crate::widget::BitpayWidget;

/// How often to look for `window.bitpay` before it loads
const WIDGET_POLL: Duration = Duration::from_millis(250);

#[component]
pub fn HarnessPage(config: HarnessConfig) -> impl IntoView {
    let harness = RwSignal::new(Harness::new(config.clone()));
    let (widget_loaded, set_widget_loaded) = signal(false);
    let defaults = InvoiceForm::default();
    let (price, set_price) = signal(defaults.price);
    let (currency, set_currency) = signal(defaults.currency);
    let (existing_id, set_existing_id) = signal(String::new());

    // Messages posted by the widget's frame
    if let Err(e) = listen_for_messages(move |origin, payload| {
        harness.update(|h| {
            h.handle_message(&origin, &payload);
        });
    }) {
        leptos::logging::error!("Failed to register message listener: {:?}", e);
    }

    // Wire the widget callbacks once bitpay.js is available
    let api_origin = config.api_origin.clone();
    let attach_widget = move || {
        if widget_loaded.get_untracked() {
            return true;
        }
        let Some(widget) = BitpayWidget::detect() else {
            return false;
        };
        register_callbacks(&widget, &api_origin, move |callback| {
            harness.update(|h| h.handle_callback(callback));
        });
        set_widget_loaded.set(true);
        true
    };

    let poll = StoredValue::new(None::<IntervalHandle>);
    let attach = attach_widget.clone();
    if !attach_widget() {
        let started = set_interval_with_handle(
            move || {
                if attach() {
                    if let Some(handle) = poll.get_value() {
                        handle.clear();
                    }
                }
            },
            WIDGET_POLL,
        );
        match started {
            Ok(handle) => poll.set_value(Some(handle)),
            Err(e) => leptos::logging::error!("Failed to poll for bitpay.js: {:?}", e),
        }
    }

    let relay_url = config.relay_url.clone();
    let create = move |_| {
        let Some(widget) = BitpayWidget::detect() else {
            return;
        };
        match harness.try_update(|h| h.begin_request(true)) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                leptos::logging::warn!("{}", e);
                return;
            }
            None => return,
        }

        let form = InvoiceForm {
            price: price.get_untracked(),
            currency: currency.get_untracked(),
        };
        let relay_url = relay_url.clone();
        leptos::task::spawn_local(async move {
            let outcome = api::create_invoice(&relay_url, &form).await;
            // Failures are logged by the harness. Show only after the signal is
            // released: showInvoice re-enters it through onModalWillEnter.
            if let Some(Ok(id)) = harness.try_update(|h| h.complete_request(outcome)) {
                widget.show_invoice(&id);
                set_existing_id.set(id);
            }
        });
    };

    let open_existing = move |_| {
        let Some(widget) = BitpayWidget::detect() else {
            return;
        };
        let typed = existing_id.get_untracked();
        match harness.try_update(|h| h.open_existing(&typed)) {
            Some(Ok(id)) => widget.show_invoice(&id),
            Some(Err(e)) => leptos::logging::warn!("{}", e),
            None => {}
        }
    };

    let clear = move |_| harness.update(Harness::clear);

    let mode_label = config.mode.to_string();
    let api_origin_label = config.api_origin.clone();

    view! {
        <div class="harness">
            <header>
                <h1>"BitPay widget test harness"</h1>
                <p class="mode">"Mode: " {mode_label} " · API origin: " {api_origin_label}</p>
                <p class="status">
                    {move || if widget_loaded.get() { "bitpay.js loaded" } else { "Waiting for bitpay.js..." }}
                </p>
            </header>

            <section class="controls">
                <div class="field">
                    <label>"Price"</label>
                    <input
                        type="number"
                        step="any"
                        prop:value=move || price.get()
                        on:input=move |ev| set_price.set(event_target_value(&ev))
                    />
                </div>
                <div class="field">
                    <label>"Currency"</label>
                    <input
                        type="text"
                        prop:value=move || currency.get()
                        on:input=move |ev| set_currency.set(event_target_value(&ev))
                    />
                </div>
                <button
                    class="btn btn-primary"
                    on:click=create
                    disabled=move || !harness.with(|h| h.can_create(widget_loaded.get()))
                >
                    {move || if harness.with(Harness::is_busy) { "Creating..." } else { "Create & Show Invoice" }}
                </button>
            </section>

            <section class="controls">
                <div class="field">
                    <label>"Invoice ID"</label>
                    <input
                        type="text"
                        placeholder="Existing invoice id"
                        prop:value=move || existing_id.get()
                        on:input=move |ev| set_existing_id.set(event_target_value(&ev))
                    />
                </div>
                <button class="btn" on:click=open_existing disabled=move || !widget_loaded.get()>
                    "Open Existing Invoice"
                </button>
                <button class="btn" on:click=clear>"Clear"</button>
            </section>

            <p class="invoice">
                {move || harness.with(|h| h.invoice_id().map(|id| format!("Current invoice: {id}")))}
            </p>

            <Show when=move || harness.with(|h| h.last_error().is_some())>
                <p class="error">
                    {move || harness.with(|h| h.last_error().unwrap_or_default().to_string())}
                </p>
            </Show>

            <section class="checklist">
                <h2>"Expected events"</h2>
                <ul>
                    {move || harness.with(|h| {
                        h.checklist()
                            .into_iter()
                            .map(|item| view! { <ChecklistRow item=item /> })
                            .collect_view()
                    })}
                </ul>
            </section>

            <section class="events">
                <h2>"Event log"</h2>
                <ul>
                    {move || harness.with(|h| {
                        h.log()
                            .iter()
                            .cloned()
                            .map(|record| view! { <EventRow record=record /> })
                            .collect_view()
                    })}
                </ul>
            </section>
        </div>
    }
}

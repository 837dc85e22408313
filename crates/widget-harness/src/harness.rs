//! Harness State Machine
//!
//! ```text
//!   Idle ──begin_request──▶ Requesting ──ok──▶ Displaying
//!    ▲                          │                  │
//!    └──────────err─────────────┘                  │
//!    Displaying/Idle ──open_existing──▶ Displaying ◀┘
//! ```
//!
//! Message and callback listeners run outside this cycle and only touch the
//! event log and the received set.

use serde_json::Value;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::event::{CALLBACK_ORIGIN, ChecklistItem, EventLog, EventRecord, ReceivedEvents};
use crate::invoice::{RelayFailure, extract_invoice_id};
use crate::widget::WidgetCallback;

/// Where the create action currently stands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Requesting,
    Displaying,
}

/// Page-level harness state
#[derive(Clone, Debug)]
pub struct Harness {
    config: HarnessConfig,
    phase: Phase,
    log: EventLog,
    received: ReceivedEvents,
    invoice_id: Option<String>,
    last_error: Option<String>,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            log: EventLog::new(),
            received: ReceivedEvents::new(),
            invoice_id: None,
            last_error: None,
        }
    }

    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    pub const fn received(&self) -> &ReceivedEvents {
        &self.received
    }

    pub fn invoice_id(&self) -> Option<&str> {
        self.invoice_id.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn checklist(&self) -> Vec<ChecklistItem> {
        self.received.checklist()
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Requesting
    }

    /// Whether the create control should be enabled
    pub fn can_create(&self, widget_loaded: bool) -> bool {
        widget_loaded && !self.is_busy()
    }

    /// Start a fresh test run
    ///
    /// Clears the log and the received set, then waits for the relay.
    pub fn begin_request(&mut self, widget_loaded: bool) -> Result<()> {
        if !widget_loaded {
            return Err(HarnessError::WidgetNotLoaded);
        }
        if self.is_busy() {
            return Err(HarnessError::RequestInProgress);
        }

        self.log.clear();
        self.received.clear();
        self.last_error = None;
        self.phase = Phase::Requesting;
        Ok(())
    }

    /// Finish a create action with the relay's answer
    ///
    /// On success returns the new invoice id for the caller to show. On
    /// failure the previous invoice id is kept and the error is remembered
    /// for display. Only valid while a request is in flight.
    ///
    /// The widget is not touched here: `showInvoice` fires `onModalWillEnter`
    /// synchronously, so [`crate::Widget::show_invoice`] must run after the caller
    /// has released the harness.
    pub fn complete_request(
        &mut self,
        outcome: std::result::Result<Value, RelayFailure>,
    ) -> Result<String> {
        if self.phase != Phase::Requesting {
            return Err(HarnessError::NoRequestInProgress);
        }

        let result = outcome
            .map_err(HarnessError::from)
            .and_then(|body| {
                extract_invoice_id(&body)
                    .map(str::to_string)
                    .ok_or(HarnessError::MissingInvoiceId)
            });

        match result {
            Ok(id) => {
                tracing::info!(invoice_id = %id, "Invoice created");
                self.invoice_id = Some(id.clone());
                self.phase = Phase::Displaying;
                Ok(id)
            }
            Err(err) => {
                tracing::error!("Error: {}", err);
                self.last_error = Some(err.to_string());
                self.phase = Phase::Idle;
                Err(err)
            }
        }
    }

    /// Re-open an invoice for inspection
    ///
    /// A blank id falls back to the current invoice. Resets only the event
    /// log; the received set carries over. Returns the id to show, with the
    /// same ordering rule as [`Self::complete_request`].
    pub fn open_existing(&mut self, invoice_id: &str) -> Result<String> {
        let invoice_id = match invoice_id.trim() {
            "" => self.invoice_id.clone().ok_or(HarnessError::EmptyInvoiceId)?,
            typed => typed.to_string(),
        };

        self.log.clear();
        self.last_error = None;
        self.invoice_id = Some(invoice_id.clone());
        self.phase = Phase::Displaying;
        Ok(invoice_id)
    }

    /// Full reset of the log and the received set
    pub fn clear(&mut self) {
        self.log.clear();
        self.received.clear();
        self.last_error = None;
    }

    /// Record a direct widget callback
    pub fn handle_callback(&mut self, callback: WidgetCallback) {
        let name = callback.name();
        self.log.push(EventRecord::now(CALLBACK_ORIGIN, name));
        self.received.insert(name);
    }

    /// Record a cross-origin message
    ///
    /// Messages from untrusted origins are dropped without a trace. Returns
    /// whether the message was accepted.
    pub fn handle_message(&mut self, origin: &str, payload: &Value) -> bool {
        if !self.config.is_trusted(origin) {
            return false;
        }

        let data = match payload {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        self.log.push(EventRecord::now(origin, data));

        if let Some(key) = message_key(payload) {
            self.received.insert(key);
        }
        true
    }
}

/// Event key carried by a message: the string itself or its `status` field
fn message_key(payload: &Value) -> Option<&str> {
    match payload {
        Value::String(text) => Some(text.as_str()),
        Value::Object(map) => map.get("status").and_then(Value::as_str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Widget, WidgetHook, register_callbacks};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records calls and keeps the registered hooks so tests can fire them
    #[derive(Default)]
    struct FakeWidget {
        shown: RefCell<Vec<String>>,
        api_prefix: RefCell<Option<String>>,
        on_enter: RefCell<Option<WidgetHook>>,
        on_leave: RefCell<Option<WidgetHook>>,
        /// Fire the enter hook from inside `show_invoice`, like bitpay.js
        enter_on_show: bool,
    }

    impl FakeWidget {
        fn fire_enter(&self) {
            (self.on_enter.borrow().as_ref().unwrap())();
        }

        fn fire_leave(&self) {
            (self.on_leave.borrow().as_ref().unwrap())();
        }
    }

    impl Widget for FakeWidget {
        fn show_invoice(&self, invoice_id: &str) {
            self.shown.borrow_mut().push(invoice_id.to_string());
            if self.enter_on_show {
                self.fire_enter();
            }
        }

        fn set_api_url_prefix(&self, origin: &str) {
            *self.api_prefix.borrow_mut() = Some(origin.to_string());
        }

        fn on_modal_will_enter(&self, hook: WidgetHook) {
            *self.on_enter.borrow_mut() = Some(hook);
        }

        fn on_modal_will_leave(&self, hook: WidgetHook) {
            *self.on_leave.borrow_mut() = Some(hook);
        }
    }

    fn local_harness() -> Harness {
        Harness::new(HarnessConfig::local(
            "http://localhost:8088",
            "http://localhost:8000/api/invoices",
        ))
    }

    #[test]
    fn test_untrusted_message_is_dropped() {
        let mut harness = local_harness();

        assert!(!harness.handle_message("https://evil.example", &json!("close")));

        assert!(harness.log().is_empty());
        assert!(harness.received().is_empty());
    }

    #[test]
    fn test_trusted_string_message() {
        let mut harness = local_harness();

        assert!(harness.handle_message("https://bitpay.com", &json!("close")));

        let record = &harness.log().records()[0];
        assert_eq!(record.origin, "https://bitpay.com");
        assert_eq!(record.data, "close");
        assert!(harness.received().contains("close"));
    }

    #[test]
    fn test_status_object_message() {
        let mut harness = local_harness();

        harness.handle_message("http://localhost:8088", &json!({"status": "loaded"}));
        harness.handle_message("http://localhost:8088", &json!({"height": 640}));
        harness.handle_message("http://localhost:8088", &json!(42));

        assert_eq!(harness.log().len(), 3);
        assert_eq!(harness.log().records()[0].data, r#"{"status":"loaded"}"#);
        assert_eq!(harness.received().iter().collect::<Vec<_>>(), ["loaded"]);
    }

    #[test]
    fn test_callbacks_append_one_record_each() {
        let widget = FakeWidget::default();
        let harness = Rc::new(RefCell::new(local_harness()));

        let sink = Rc::clone(&harness);
        register_callbacks(&widget, "http://localhost:8088", move |cb| {
            sink.borrow_mut().handle_callback(cb);
        });
        assert_eq!(widget.api_prefix.borrow().as_deref(), Some("http://localhost:8088"));

        widget.fire_enter();
        assert_eq!(harness.borrow().log().len(), 1);
        widget.fire_leave();

        let harness = harness.borrow();
        let records = harness.log().records();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(EventRecord::is_callback));
        assert_eq!(records[0].data, "onModalWillEnter");
        assert_eq!(records[1].data, "onModalWillLeave");
        assert!(harness.received().contains("onModalWillEnter"));
        assert!(harness.received().contains("onModalWillLeave"));
    }

    #[test]
    fn test_create_flow_success() {
        let mut harness = local_harness();
        harness.handle_message("https://bitpay.com", &json!("close"));

        harness.begin_request(true).unwrap();
        assert_eq!(harness.phase(), Phase::Requesting);
        assert!(harness.log().is_empty());
        assert!(harness.received().is_empty());
        assert!(!harness.can_create(true));

        let id = harness
            .complete_request(Ok(json!({"data": {"id": "abc123"}})))
            .unwrap();

        assert_eq!(id, "abc123");
        assert_eq!(harness.phase(), Phase::Displaying);
        assert_eq!(harness.invoice_id(), Some("abc123"));
        assert!(harness.can_create(true));
    }

    #[test]
    fn test_enter_callback_fired_from_show_invoice_is_recorded() {
        // bitpay.js calls onModalWillEnter from inside showInvoice
        let widget = FakeWidget {
            enter_on_show: true,
            ..FakeWidget::default()
        };
        let harness = Rc::new(RefCell::new(local_harness()));

        let sink = Rc::clone(&harness);
        register_callbacks(&widget, "http://localhost:8088", move |cb| {
            sink.borrow_mut().handle_callback(cb);
        });

        harness.borrow_mut().begin_request(true).unwrap();
        let id = harness
            .borrow_mut()
            .complete_request(Ok(json!({"data": {"id": "abc"}})))
            .unwrap();
        widget.show_invoice(&id);

        let id = harness.borrow_mut().open_existing("").unwrap();
        widget.show_invoice(&id);

        let harness = harness.borrow();
        assert_eq!(*widget.shown.borrow(), ["abc", "abc"]);
        assert_eq!(harness.log().len(), 1);
        assert_eq!(harness.log().records()[0].data, "onModalWillEnter");
        assert!(harness.received().contains("onModalWillEnter"));
    }

    #[test]
    fn test_create_flow_failure_keeps_invoice_id() {
        let mut harness = local_harness();
        harness.open_existing("previous").unwrap();

        harness.begin_request(true).unwrap();
        let failure = RelayFailure::from_error_body(402, &json!({"error": "insufficient"}));
        let err = harness.complete_request(Err(failure)).unwrap_err();

        assert_eq!(err.to_string(), "insufficient");
        assert_eq!(harness.phase(), Phase::Idle);
        assert_eq!(harness.invoice_id(), Some("previous"));
        assert_eq!(harness.last_error(), Some("insufficient"));
    }

    #[test]
    fn test_success_without_id_is_an_error() {
        let mut harness = local_harness();

        harness.begin_request(true).unwrap();
        let err = harness.complete_request(Ok(json!({"data": {}}))).unwrap_err();

        assert_eq!(err, HarnessError::MissingInvoiceId);
        assert_eq!(harness.phase(), Phase::Idle);
        assert_eq!(harness.invoice_id(), None);
    }

    #[test]
    fn test_complete_without_request_is_rejected() {
        let mut harness = local_harness();
        harness.open_existing("inv-1").unwrap();

        let err = harness
            .complete_request(Ok(json!({"data": {"id": "late"}})))
            .unwrap_err();

        assert_eq!(err, HarnessError::NoRequestInProgress);
        assert_eq!(harness.phase(), Phase::Displaying);
        assert_eq!(harness.invoice_id(), Some("inv-1"));
        assert_eq!(harness.last_error(), None);

        let mut idle = local_harness();
        assert_eq!(
            idle.complete_request(Err(RelayFailure::Transport("boom".into()))),
            Err(HarnessError::NoRequestInProgress)
        );
        assert_eq!(idle.phase(), Phase::Idle);
    }

    #[test]
    fn test_begin_request_guards() {
        let mut harness = local_harness();
        assert_eq!(harness.begin_request(false), Err(HarnessError::WidgetNotLoaded));
        assert!(!harness.can_create(false));

        harness.begin_request(true).unwrap();
        assert_eq!(harness.begin_request(true), Err(HarnessError::RequestInProgress));
    }

    #[test]
    fn test_clear_resets_log_and_received() {
        let mut harness = local_harness();
        harness.handle_message("https://bitpay.com", &json!("loaded"));
        harness.handle_callback(WidgetCallback::ModalWillEnter);

        harness.clear();

        assert!(harness.log().is_empty());
        assert!(harness.received().is_empty());
    }

    #[test]
    fn test_open_existing_resets_only_log() {
        let mut harness = local_harness();
        harness.handle_message("https://bitpay.com", &json!("loaded"));

        let id = harness.open_existing(" inv-9 ").unwrap();

        assert_eq!(id, "inv-9");
        assert!(harness.log().is_empty());
        assert!(harness.received().contains("loaded"));
        assert_eq!(harness.invoice_id(), Some("inv-9"));
        assert_eq!(harness.phase(), Phase::Displaying);
    }

    #[test]
    fn test_open_existing_blank_reuses_current_invoice() {
        let mut harness = local_harness();
        harness.open_existing("inv-3").unwrap();
        harness.handle_message("https://bitpay.com", &json!("loaded"));

        let id = harness.open_existing("   ").unwrap();

        assert_eq!(id, "inv-3");
        assert!(harness.log().is_empty());
        assert_eq!(harness.invoice_id(), Some("inv-3"));
    }

    #[test]
    fn test_open_existing_requires_id() {
        let mut harness = local_harness();
        harness.handle_message("https://bitpay.com", &json!("loaded"));

        assert_eq!(harness.open_existing("  "), Err(HarnessError::EmptyInvoiceId));
        assert_eq!(harness.log().len(), 1);
        assert_eq!(harness.phase(), Phase::Idle);
        assert_eq!(harness.invoice_id(), None);
    }

    #[test]
    fn test_received_keys_come_from_logged_events() {
        let mut harness = local_harness();
        harness.handle_message("https://bitpay.com", &json!("loaded"));
        harness.handle_message("https://bitpay.com", &json!({"status": "paid"}));
        harness.handle_message("https://evil.example", &json!("close"));
        harness.handle_callback(WidgetCallback::ModalWillLeave);

        for key in harness.received().iter() {
            assert!(harness.log().iter().any(|r| r.data.contains(key)));
        }
    }
}

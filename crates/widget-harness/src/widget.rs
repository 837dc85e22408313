//! Widget Boundary
//!
//! The harness only needs four things from the vendor script. Anything that
//! provides them (the real `window.bitpay`, a test fake) is a [`Widget`].

/// Callback invoked by the widget
pub type WidgetHook = Box<dyn Fn() + 'static>;

/// Client-side invoice widget
pub trait Widget {
    /// Open the payment modal for an invoice
    fn show_invoice(&self, invoice_id: &str);

    /// Point the widget at an API origin
    fn set_api_url_prefix(&self, origin: &str);

    /// Fired when the modal is about to open
    fn on_modal_will_enter(&self, hook: WidgetHook);

    /// Fired when the modal is about to close
    fn on_modal_will_leave(&self, hook: WidgetHook);
}

/// Named callback slots the widget offers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetCallback {
    ModalWillEnter,
    ModalWillLeave,
}

impl WidgetCallback {
    pub const ALL: [Self; 2] = [Self::ModalWillEnter, Self::ModalWillLeave];

    /// Event key, as shown in the log and checklist
    pub const fn name(self) -> &'static str {
        match self {
            Self::ModalWillEnter => "onModalWillEnter",
            Self::ModalWillLeave => "onModalWillLeave",
        }
    }
}

impl std::fmt::Display for WidgetCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One-time widget setup at page start
///
/// Sets the API origin and routes both callback slots into `on_event`.
pub fn register_callbacks<W, F>(widget: &W, api_origin: &str, on_event: F)
where
    W: Widget + ?Sized,
    F: Fn(WidgetCallback) + Clone + 'static,
{
    widget.set_api_url_prefix(api_origin);

    let enter = on_event.clone();
    widget.on_modal_will_enter(Box::new(move || enter(WidgetCallback::ModalWillEnter)));

    widget.on_modal_will_leave(Box::new(move || on_event(WidgetCallback::ModalWillLeave)));

    tracing::debug!(api_origin, "Widget callbacks registered");
}

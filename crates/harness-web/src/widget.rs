//! `window.bitpay` Bindings
//!
//! The vendor script installs a plain object on `window`. Its methods are
//! looked up and called through `Reflect`, and the object is wrapped as a
//! [`Widget`] the harness can drive.

use wasm_bindgen::prelude::*;
use web_sys::js_sys::{Function, Object, Reflect};
use widget_harness::widget::{Widget, WidgetHook};

/// The vendor widget, once its script has loaded
#[derive(Debug, Clone)]
pub struct BitpayWidget {
    inner: Object,
}

impl BitpayWidget {
    /// Look up `window.bitpay`; `None` until the script has run
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let value = Reflect::get(&window, &JsValue::from_str("bitpay")).ok()?;
        let inner = value.dyn_into::<Object>().ok()?;
        Some(Self { inner })
    }

    /// `bitpay.<method>(arg)`
    fn call(&self, method: &str, arg: &JsValue) -> Result<(), JsValue> {
        let function = Reflect::get(&self.inner, &JsValue::from_str(method))?
            .dyn_into::<Function>()
            .map_err(|_| JsValue::from_str(&format!("bitpay.{method} is not a function")))?;
        function.call1(&self.inner, arg)?;
        Ok(())
    }

    fn call_logged(&self, method: &str, arg: &JsValue) {
        if let Err(e) = self.call(method, arg) {
            leptos::logging::error!("bitpay.{} failed: {:?}", method, e);
        }
    }
}

/// Hand a hook to JS for the rest of the page's life
fn leak_hook(hook: WidgetHook) -> JsValue {
    let closure = Closure::wrap(hook);
    let function = closure.as_ref().clone();
    closure.forget();
    function
}

impl Widget for BitpayWidget {
    fn show_invoice(&self, invoice_id: &str) {
        self.call_logged("showInvoice", &JsValue::from_str(invoice_id));
    }

    fn set_api_url_prefix(&self, origin: &str) {
        self.call_logged("setApiUrlPrefix", &JsValue::from_str(origin));
    }

    fn on_modal_will_enter(&self, hook: WidgetHook) {
        self.call_logged("onModalWillEnter", &leak_hook(hook));
    }

    fn on_modal_will_leave(&self, hook: WidgetHook) {
        self.call_logged("onModalWillLeave", &leak_hook(hook));
    }
}

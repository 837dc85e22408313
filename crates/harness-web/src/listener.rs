//! Cross-origin `message` listener

use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::MessageEvent;
use web_sys::js_sys::JSON;

/// Register a `message` listener on `window` for the page's lifetime
///
/// Origin filtering is left to the harness.
pub fn listen_for_messages(on_message: impl Fn(String, Value) + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let closure = Closure::<dyn Fn(MessageEvent)>::new(move |event: MessageEvent| {
        on_message(event.origin(), message_payload(&event.data()));
    });
    window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

/// Convert `event.data` into JSON
///
/// Strings stay strings. Anything `JSON.stringify` rejects becomes `null`.
fn message_payload(data: &JsValue) -> Value {
    if let Some(text) = data.as_string() {
        return Value::String(text);
    }
    JSON::stringify(data)
        .ok()
        .and_then(|json| json.as_string())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or(Value::Null)
}

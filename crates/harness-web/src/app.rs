//! Main App Component

use leptos::prelude::*;
use widget_harness::HarnessConfig;

use crate::pages::HarnessPage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let config = page_config();

    view! {
        <main class="app">
            <HarnessPage config=config />
        </main>
    }
}

/// Read the page variant's `data-*` attributes from `<body>`
///
/// `data-mode` selects local or production; `data-api-origin` and
/// `data-relay-url` override the defaults for that mode.
fn page_config() -> HarnessConfig {
    let window = web_sys::window();
    let page_origin = window
        .as_ref()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:8000".into());
    let body = window.and_then(|w| w.document()).and_then(|d| d.body());
    let attr = |name: &str| body.as_ref().and_then(|b| b.get_attribute(name));

    HarnessConfig::from_page_attributes(
        attr("data-mode").as_deref(),
        attr("data-api-origin").as_deref(),
        attr("data-relay-url").as_deref(),
        &page_origin,
    )
}

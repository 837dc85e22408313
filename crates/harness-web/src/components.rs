//! UI Components

use leptos::prelude::*;
use widget_harness::{ChecklistItem, EventRecord};

/// One row of the event log
#[component]
pub fn EventRow(record: EventRecord) -> impl IntoView {
    let class = if record.is_callback() {
        "event event-callback"
    } else {
        "event event-message"
    };

    view! {
        <li class=class>
            <span class="time">{record.timestamp.clone()}</span>
            <span class="origin">{record.origin.clone()}</span>
            <code class="data">{record.data.clone()}</code>
        </li>
    }
}

/// One expected event with its received mark
#[component]
pub fn ChecklistRow(item: ChecklistItem) -> impl IntoView {
    let class = if item.received { "check done" } else { "check" };

    view! {
        <li class=class>
            <span class="mark">{if item.received { "✓" } else { "○" }}</span>
            <span class="name">{item.name}</span>
        </li>
    }
}

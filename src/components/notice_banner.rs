use leptos::prelude::*;

use crate::context::BoardSignals;

/// Notification element; hidden via the `hidden` class, never removed.
#[component]
pub fn NoticeBanner(signals: BoardSignals) -> impl IntoView {
    view! {
        <div id="message" class=move || signals.notice_class()>
            {move || signals.notice.get().map(|n| n.text).unwrap_or_default()}
        </div>
    }
}

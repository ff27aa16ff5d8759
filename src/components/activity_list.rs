//! Activity List Component
//!
//! Card markup is replaced wholesale on every load, so remove buttons are
//! handled by one delegated click listener on the container.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::app::AppController;
use crate::context::BoardSignals;

/// Participant named by a clicked remove button's `data-*` attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveTarget {
    pub activity: String,
    pub email: String,
}

impl RemoveTarget {
    /// `None` when either attribute is missing or empty.
    pub fn from_attributes(activity: Option<String>, email: Option<String>) -> Option<Self> {
        let activity = activity.filter(|a| !a.is_empty())?;
        let email = email.filter(|e| !e.is_empty())?;
        Some(Self { activity, email })
    }
}

#[component]
pub fn ActivityList(signals: BoardSignals, controller: Rc<AppController>) -> impl IntoView {
    let on_click = move |ev: web_sys::MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        let Ok(Some(button)) = target.closest(".participant-remove") else {
            return;
        };
        let Some(remove) = RemoveTarget::from_attributes(
            button.get_attribute("data-activity"),
            button.get_attribute("data-email"),
        ) else {
            return;
        };

        let controller = controller.clone();
        spawn_local(async move {
            controller.submit_unregister(&remove.activity, &remove.email).await;
        });
    };

    view! {
        <div id="activities-list" on:click=on_click inner_html=move || signals.list_html.get()></div>
    }
}

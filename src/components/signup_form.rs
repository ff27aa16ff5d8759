//! Signup Form Component

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::AppController;
use crate::context::BoardSignals;
use crate::markup::SELECT_PLACEHOLDER;

#[component]
pub fn SignupForm(signals: BoardSignals, controller: Rc<AppController>) -> impl IntoView {
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = signals.email.get_untracked();
        let activity = signals.selected_activity.get_untracked();

        let controller = controller.clone();
        spawn_local(async move {
            controller.submit_signup(&activity, &email).await;
        });
    };

    view! {
        <form id="signup-form" on:submit=on_submit>
            <div class="form-group">
                <label for="email">"Student Email:"</label>
                <input
                    type="email"
                    id="email"
                    required
                    placeholder="your-email@mergington.edu"
                    prop:value=move || signals.email.get()
                    on:input=move |ev| signals.email.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="activity">"Select Activity:"</label>
                <select
                    id="activity"
                    required
                    prop:value=move || signals.selected_activity.get()
                    on:change=move |ev| signals.selected_activity.set(event_target_value(&ev))
                >
                    <option value="">{SELECT_PLACEHOLDER}</option>
                    {move || signals.activity_names.get().into_iter().map(|name| {
                        let label = name.clone();
                        view! { <option value=name>{label}</option> }
                    }).collect_view()}
                </select>
            </div>
            <button type="submit">"Sign Up"</button>
        </form>
    }
}

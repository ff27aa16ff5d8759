//! Activity Board App
//!
//! Root component: builds the controller and lays out the list, form and notification.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpActivityApi;
use crate::browser::{TimerDelay, WindowConfirm};
use crate::components::{ActivityList, NoticeBanner, SignupForm};
use crate::config::BoardConfig;
use crate::context::BoardSignals;
use crate::controller::BoardController;

pub type AppController = BoardController<HttpActivityApi, BoardSignals, WindowConfirm, TimerDelay>;

#[component]
pub fn App(config: BoardConfig) -> impl IntoView {
    let signals = BoardSignals::new();
    let controller: Rc<AppController> = Rc::new(BoardController::new(
        HttpActivityApi::new(&config),
        signals,
        WindowConfirm,
        TimerDelay,
        &config,
    ));

    {
        let controller = controller.clone();
        spawn_local(async move {
            controller.start().await;
        });
    }

    view! {
        <main class="board-layout">
            <section id="activities-container">
                <h3>"Available Activities"</h3>
                <ActivityList signals=signals controller=controller.clone() />
            </section>

            <section id="signup-container">
                <h3>"Sign Up for an Activity"</h3>
                <SignupForm signals=signals controller=controller />
                <NoticeBanner signals=signals />
            </section>
        </main>
    }
}

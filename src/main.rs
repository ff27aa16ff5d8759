//! Activity Board Frontend Entry Point

mod api;
mod app;
mod browser;
mod components;
mod config;
mod context;
mod controller;
mod error;
mod logging;
mod markup;
mod models;

use app::App;
use config::BoardConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = BoardConfig::from_window();
    logging::init(config.log_level);
    log::info!(target: "App", "Activities API at {}", config.api_base);

    mount_to_body(move || view! { <App config=config /> });
}

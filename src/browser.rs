//! Browser Seams
//!
//! `window.confirm` and timer-backed delays for the controller.

use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

use crate::controller::{Confirm, Delay};

pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

pub struct TimerDelay;

#[async_trait(?Send)]
impl Delay for TimerDelay {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

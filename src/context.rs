//! Board Signals
//!
//! Reactive state the components render from, written by the controller.

use leptos::prelude::*;

use crate::controller::{BoardView, Notice};
use crate::markup::{render_board, LOAD_FAILED_HTML};
use crate::models::ActivityBoard;

/// Page-wide signals, shared by copy
#[derive(Clone, Copy)]
pub struct BoardSignals {
    /// Rendered card markup for the list container
    pub list_html: RwSignal<String>,
    /// Select options, from the same board as `list_html`
    pub activity_names: RwSignal<Vec<String>>,
    pub notice: RwSignal<Option<Notice>>,
    pub notice_visible: RwSignal<bool>,
    /// Signup form fields
    pub email: RwSignal<String>,
    pub selected_activity: RwSignal<String>,
}

impl BoardSignals {
    pub fn new() -> Self {
        Self {
            list_html: RwSignal::new("<p>Loading activities...</p>".to_string()),
            activity_names: RwSignal::new(Vec::new()),
            notice: RwSignal::new(None),
            notice_visible: RwSignal::new(false),
            email: RwSignal::new(String::new()),
            selected_activity: RwSignal::new(String::new()),
        }
    }

    /// Class list of the notification element
    pub fn notice_class(&self) -> String {
        let kind = self.notice.with(|n| n.as_ref().map(|n| n.kind.class()));
        match (kind, self.notice_visible.get()) {
            (Some(kind), true) => kind.to_string(),
            (Some(kind), false) => format!("{} hidden", kind),
            (None, _) => "hidden".to_string(),
        }
    }
}

impl BoardView for BoardSignals {
    fn render_activities(&self, board: &ActivityBoard) {
        self.list_html.set(render_board(board));
        self.activity_names.set(board.names());
    }

    fn render_load_failure(&self) {
        self.list_html.set(LOAD_FAILED_HTML.to_string());
    }

    fn show_notice(&self, notice: &Notice) {
        self.notice.set(Some(notice.clone()));
        self.notice_visible.set(true);
    }

    fn hide_notice(&self) {
        self.notice_visible.set(false);
    }

    fn reset_form(&self) {
        self.email.set(String::new());
        self.selected_activity.set(String::new());
    }
}

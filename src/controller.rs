//! Board Controller
//!
//! Loads the board, submits signups and unregistrations, and drives the
//! notification. Browser access goes through the [`BoardView`], [`Confirm`]
//! and [`Delay`] seams so the controller runs the same under tests.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ActivityApi, MutationOutcome};
use crate::config::BoardConfig;
use crate::models::{ActivityBoard, MutationReply};

const SIGNUP_ACCEPTED: &str = "Signed up";
const SIGNUP_REJECTED: &str = "An error occurred";
const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
const UNREGISTER_ACCEPTED: &str = "Participant removed";
const UNREGISTER_REJECTED: &str = "Failed to remove participant";
const UNREGISTER_FAILED: &str = "Failed to remove participant. Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// Style class on the notification element
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

/// Everything the controller writes to the page.
pub trait BoardView {
    /// Replace the card list and the select options from one board.
    fn render_activities(&self, board: &ActivityBoard);
    /// Replace the card list with the load failure message.
    fn render_load_failure(&self);
    /// Set the notification text and style and make it visible.
    fn show_notice(&self, notice: &Notice);
    fn hide_notice(&self);
    fn reset_form(&self);
}

/// Blocking yes/no question to the user.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

#[async_trait(?Send)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

impl<T: BoardView + ?Sized> BoardView for Rc<T> {
    fn render_activities(&self, board: &ActivityBoard) {
        (**self).render_activities(board)
    }

    fn render_load_failure(&self) {
        (**self).render_load_failure()
    }

    fn show_notice(&self, notice: &Notice) {
        (**self).show_notice(notice)
    }

    fn hide_notice(&self) {
        (**self).hide_notice()
    }

    fn reset_form(&self) {
        (**self).reset_form()
    }
}

impl<T: Confirm + ?Sized> Confirm for Rc<T> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

#[async_trait(?Send)]
impl<T: Delay + ?Sized> Delay for Rc<T> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}

pub struct BoardController<A, V, C, D> {
    api: A,
    view: V,
    confirm: C,
    delay: D,
    notice_timeout: Duration,
    /// Bumped on every shown notice; a pending auto-hide only fires for its own generation
    notice_generation: Cell<u64>,
}

impl<A, V, C, D> BoardController<A, V, C, D>
where
    A: ActivityApi,
    V: BoardView,
    C: Confirm,
    D: Delay,
{
    pub fn new(api: A, view: V, confirm: C, delay: D, config: &BoardConfig) -> Self {
        Self {
            api,
            view,
            confirm,
            delay,
            notice_timeout: config.notice_timeout,
            notice_generation: Cell::new(0),
        }
    }

    /// Initial load on mount. Nothing polls afterwards; only mutations reload.
    pub async fn start(&self) {
        log::info!(target: "Board", "Board mounted");
        self.load_activities().await;
    }

    /// Fetch the board and replace both views with it.
    ///
    /// On failure only the card list changes; the select keeps its options.
    pub async fn load_activities(&self) {
        match self.api.list_activities().await {
            Ok(board) => {
                log::info!(target: "Board", "Loaded {} activities", board.len());
                self.view.render_activities(&board);
            }
            Err(e) => {
                log::error!(target: "Board", "Error fetching activities: {}", e);
                self.view.render_load_failure();
            }
        }
    }

    pub async fn submit_signup(&self, activity: &str, email: &str) {
        let (notice, refresh) = match self.api.sign_up(activity, email).await {
            Ok(MutationOutcome::Accepted(reply)) => {
                self.view.reset_form();
                (Notice::success(reply.message.unwrap_or_else(|| SIGNUP_ACCEPTED.into())), true)
            }
            Ok(MutationOutcome::Rejected { reply, .. }) => {
                let text = reply.detail.unwrap_or_else(|| SIGNUP_REJECTED.into());
                (Notice::error(text), false)
            }
            Err(e) => {
                log::error!(target: "Board", "Error signing up: {}", e);
                (Notice::error(SIGNUP_FAILED), false)
            }
        };
        self.announce(notice, refresh).await;
    }

    /// Remove `email` from `activity` after the user confirms.
    ///
    /// Empty identifiers come from a remove button without data and are ignored.
    pub async fn submit_unregister(&self, activity: &str, email: &str) {
        if activity.is_empty() || email.is_empty() {
            return;
        }
        if !self.confirm.confirm(&unregister_prompt(activity, email)) {
            return;
        }

        let (notice, refresh) = match self.api.unregister(activity, email).await {
            Ok(MutationOutcome::Accepted(reply)) => {
                (Notice::success(reply.message.unwrap_or_else(|| UNREGISTER_ACCEPTED.into())), true)
            }
            Ok(MutationOutcome::Rejected { reply, .. }) => (Notice::error(rejection_text(reply)), false),
            Err(e) => {
                log::error!(target: "Board", "Error removing participant: {}", e);
                (Notice::error(UNREGISTER_FAILED), false)
            }
        };
        self.announce(notice, refresh).await;
    }

    /// Show the notice, then wait out its timeout (alongside a reload if requested).
    async fn announce(&self, notice: Notice, refresh: bool) {
        let generation = self.notice_generation.get() + 1;
        self.notice_generation.set(generation);
        self.view.show_notice(&notice);

        if refresh {
            futures::join!(self.load_activities(), self.hide_notice_after(generation));
        } else {
            self.hide_notice_after(generation).await;
        }
    }

    async fn hide_notice_after(&self, generation: u64) {
        self.delay.sleep(self.notice_timeout).await;
        if self.notice_generation.get() == generation {
            self.view.hide_notice();
        }
    }
}

pub fn unregister_prompt(activity: &str, email: &str) -> String {
    format!("Unregister {} from \"{}\"?", email, activity)
}

fn rejection_text(reply: MutationReply) -> String {
    reply.detail.or(reply.message).unwrap_or_else(|| UNREGISTER_REJECTED.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::future::Future;

    const BOARD_JSON: &str = r#"{
        "Chess Club": {"description": "Strategy", "schedule": "Fri", "max_participants": 12, "participants": ["michael@mergington.edu"]},
        "Art Club": {"description": "Paint", "schedule": "Thu", "max_participants": 15, "participants": []}
    }"#;

    /// Scripted server reply
    #[derive(Clone)]
    enum Reply {
        Status(u16, &'static str),
        Broken,
    }

    impl Reply {
        fn outcome(&self, url: &str) -> Result<MutationOutcome, ApiError> {
            match self {
                Reply::Status(status, body) => Ok(MutationOutcome::from_status(*status, serde_json::from_str(body).unwrap())),
                Reply::Broken => Err(broken(url)),
            }
        }
    }

    fn broken(url: &str) -> ApiError {
        let source = serde_json::from_str::<MutationReply>("not json").unwrap_err();
        ApiError::Decode { url: url.into(), source }
    }

    struct FakeApi {
        list: RefCell<Result<&'static str, ()>>,
        signup: Reply,
        unregister: Reply,
        list_calls: Cell<usize>,
        mutations: RefCell<Vec<String>>,
    }

    impl FakeApi {
        fn new(signup: Reply, unregister: Reply) -> Self {
            Self {
                list: RefCell::new(Ok(BOARD_JSON)),
                signup,
                unregister,
                list_calls: Cell::new(0),
                mutations: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ActivityApi for FakeApi {
        async fn list_activities(&self) -> Result<ActivityBoard, ApiError> {
            self.list_calls.set(self.list_calls.get() + 1);
            match *self.list.borrow() {
                Ok(json) => Ok(serde_json::from_str(json).unwrap()),
                Err(()) => Err(broken("/activities")),
            }
        }

        async fn sign_up(&self, activity: &str, email: &str) -> Result<MutationOutcome, ApiError> {
            self.mutations.borrow_mut().push(format!("POST {activity} {email}"));
            self.signup.outcome("/signup")
        }

        async fn unregister(&self, activity: &str, email: &str) -> Result<MutationOutcome, ApiError> {
            self.mutations.borrow_mut().push(format!("DELETE {activity} {email}"));
            self.unregister.outcome("/participants")
        }
    }

    #[derive(Default)]
    struct RecordingView {
        cards: RefCell<Vec<Vec<String>>>,
        options: RefCell<Vec<Vec<String>>>,
        load_failures: Cell<usize>,
        notices: RefCell<Vec<Notice>>,
        visible: Cell<bool>,
        resets: Cell<usize>,
    }

    impl BoardView for RecordingView {
        fn render_activities(&self, board: &ActivityBoard) {
            self.cards.borrow_mut().push(board.iter().map(|(n, _)| n.to_string()).collect());
            self.options.borrow_mut().push(board.names());
        }

        fn render_load_failure(&self) {
            self.load_failures.set(self.load_failures.get() + 1);
        }

        fn show_notice(&self, notice: &Notice) {
            self.notices.borrow_mut().push(notice.clone());
            self.visible.set(true);
        }

        fn hide_notice(&self) {
            self.visible.set(false);
        }

        fn reset_form(&self) {
            self.resets.set(self.resets.get() + 1);
        }
    }

    struct FixedConfirm {
        answer: bool,
        prompts: RefCell<Vec<String>>,
    }

    impl Confirm for FixedConfirm {
        fn confirm(&self, message: &str) -> bool {
            self.prompts.borrow_mut().push(message.to_string());
            self.answer
        }
    }

    /// Sleeps until the test releases them.
    #[derive(Default)]
    struct ManualDelay {
        pending: RefCell<Vec<(Duration, Option<oneshot::Sender<()>>)>>,
    }

    impl ManualDelay {
        fn requested(&self) -> Vec<Duration> {
            self.pending.borrow().iter().map(|(d, _)| *d).collect()
        }

        fn release(&self, index: usize) {
            if let Some(tx) = self.pending.borrow_mut()[index].1.take() {
                let _ = tx.send(());
            }
        }
    }

    #[async_trait(?Send)]
    impl Delay for ManualDelay {
        async fn sleep(&self, duration: Duration) {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().push((duration, Some(tx)));
            let _ = rx.await;
        }
    }

    type TestController = BoardController<Rc<FakeApi>, Rc<RecordingView>, Rc<FixedConfirm>, Rc<ManualDelay>>;

    struct Harness {
        pool: LocalPool,
        api: Rc<FakeApi>,
        view: Rc<RecordingView>,
        confirm: Rc<FixedConfirm>,
        delay: Rc<ManualDelay>,
        controller: Rc<TestController>,
    }

    impl Harness {
        fn new(api: FakeApi, confirm_answer: bool) -> Self {
            let api = Rc::new(api);
            let view = Rc::new(RecordingView::default());
            let confirm = Rc::new(FixedConfirm { answer: confirm_answer, prompts: RefCell::new(Vec::new()) });
            let delay = Rc::new(ManualDelay::default());
            let controller = Rc::new(BoardController::new(
                api.clone(),
                view.clone(),
                confirm.clone(),
                delay.clone(),
                &BoardConfig::default(),
            ));
            Self { pool: LocalPool::new(), api, view, confirm, delay, controller }
        }

        /// Spawn an operation and run until everything is parked.
        fn run<F, Fut>(&mut self, op: F)
        where
            F: FnOnce(Rc<TestController>) -> Fut,
            Fut: Future<Output = ()> + 'static,
        {
            let fut = op(self.controller.clone());
            self.pool.spawner().spawn_local(fut).unwrap();
            self.pool.run_until_stalled();
        }

        fn settle(&mut self) {
            self.pool.run_until_stalled();
        }
    }

    fn ok_signup() -> Reply {
        Reply::Status(200, r#"{"message": "Signed up"}"#)
    }

    fn ok_unregister() -> Reply {
        Reply::Status(200, r#"{"message": "Removed michael@mergington.edu from Chess Club"}"#)
    }

    #[test]
    fn test_load_renders_cards_and_options_in_lockstep() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), ok_unregister()), true);
        h.run(|c| async move { c.load_activities().await });

        assert_eq!(h.api.list_calls.get(), 1);
        assert_eq!(*h.view.cards.borrow(), vec![vec!["Chess Club", "Art Club"]]);
        assert_eq!(*h.view.cards.borrow(), *h.view.options.borrow());
    }

    #[test]
    fn test_start_loads_exactly_once() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), ok_unregister()), true);
        h.run(|c| async move { c.start().await });
        h.settle();

        assert_eq!(h.api.list_calls.get(), 1);
        assert_eq!(h.view.cards.borrow().len(), 1);
        assert!(h.view.notices.borrow().is_empty());
        assert!(h.delay.requested().is_empty());
    }

    #[test]
    fn test_load_failure_renders_placeholder_only() {
        let api = FakeApi::new(ok_signup(), ok_unregister());
        *api.list.borrow_mut() = Err(());
        let mut h = Harness::new(api, true);
        h.run(|c| async move { c.load_activities().await });

        assert_eq!(h.view.load_failures.get(), 1);
        assert!(h.view.options.borrow().is_empty());
        assert!(h.view.notices.borrow().is_empty());
    }

    #[test]
    fn test_signup_success_reloads_once_and_notifies() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), ok_unregister()), true);
        h.run(|c| async move { c.submit_signup("Chess Club", "x@y.com").await });

        assert_eq!(*h.api.mutations.borrow(), vec!["POST Chess Club x@y.com"]);
        assert_eq!(h.api.list_calls.get(), 1);
        assert_eq!(*h.view.notices.borrow(), vec![Notice::success("Signed up")]);
        assert!(h.view.visible.get());
        assert_eq!(h.view.resets.get(), 1);
    }

    #[test]
    fn test_signup_success_without_message_uses_fallback() {
        let mut h = Harness::new(FakeApi::new(Reply::Status(201, "{}"), ok_unregister()), true);
        h.run(|c| async move { c.submit_signup("Chess Club", "x@y.com").await });

        assert_eq!(*h.view.notices.borrow(), vec![Notice::success("Signed up")]);
    }

    #[test]
    fn test_signup_rejected_shows_detail_without_reset_or_reload() {
        let api = FakeApi::new(Reply::Status(400, r#"{"detail": "Already registered"}"#), ok_unregister());
        let mut h = Harness::new(api, true);
        h.run(|c| async move { c.submit_signup("Chess Club", "x@y.com").await });

        assert_eq!(*h.view.notices.borrow(), vec![Notice::error("Already registered")]);
        assert_eq!(h.view.resets.get(), 0);
        assert_eq!(h.api.list_calls.get(), 0);
    }

    #[test]
    fn test_signup_rejected_without_detail_uses_fallback() {
        let api = FakeApi::new(Reply::Status(500, r#"{"message": "ignored"}"#), ok_unregister());
        let mut h = Harness::new(api, true);
        h.run(|c| async move { c.submit_signup("Chess Club", "x@y.com").await });

        assert_eq!(*h.view.notices.borrow(), vec![Notice::error("An error occurred")]);
    }

    #[test]
    fn test_signup_transport_failure_shows_generic_error() {
        let mut h = Harness::new(FakeApi::new(Reply::Broken, ok_unregister()), true);
        h.run(|c| async move { c.submit_signup("Chess Club", "x@y.com").await });

        assert_eq!(*h.view.notices.borrow(), vec![Notice::error("Failed to sign up. Please try again.")]);
        assert!(h.view.visible.get());
        assert_eq!(h.delay.requested(), vec![Duration::from_millis(5000)]);
        assert_eq!(h.api.list_calls.get(), 0);
    }

    #[test]
    fn test_unregister_declined_sends_nothing() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), ok_unregister()), false);
        h.run(|c| async move { c.submit_unregister("Chess Club", "michael@mergington.edu").await });

        assert_eq!(*h.confirm.prompts.borrow(), vec![r#"Unregister michael@mergington.edu from "Chess Club"?"#]);
        assert!(h.api.mutations.borrow().is_empty());
        assert!(h.view.notices.borrow().is_empty());
        assert!(h.delay.requested().is_empty());
    }

    #[test]
    fn test_unregister_missing_data_is_noop() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), ok_unregister()), true);
        h.run(|c| async move {
            c.submit_unregister("", "michael@mergington.edu").await;
            c.submit_unregister("Chess Club", "").await;
        });

        assert!(h.confirm.prompts.borrow().is_empty());
        assert!(h.api.mutations.borrow().is_empty());
        assert!(h.view.notices.borrow().is_empty());
    }

    #[test]
    fn test_unregister_confirmed_removes_and_reloads() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), ok_unregister()), true);
        h.run(|c| async move { c.submit_unregister("Chess Club", "michael@mergington.edu").await });

        assert_eq!(*h.api.mutations.borrow(), vec!["DELETE Chess Club michael@mergington.edu"]);
        assert_eq!(h.api.list_calls.get(), 1);
        assert_eq!(
            *h.view.notices.borrow(),
            vec![Notice::success("Removed michael@mergington.edu from Chess Club")]
        );
        assert_eq!(h.view.resets.get(), 0);
    }

    #[test]
    fn test_unregister_rejection_text_precedence() {
        let cases = [
            (r#"{"detail": "Participant not found", "message": "m"}"#, "Participant not found"),
            (r#"{"message": "Cannot remove"}"#, "Cannot remove"),
            ("{}", "Failed to remove participant"),
        ];
        for (body, expected) in cases {
            let mut h = Harness::new(FakeApi::new(ok_signup(), Reply::Status(404, body)), true);
            h.run(|c| async move { c.submit_unregister("Chess Club", "nobody@x.com").await });

            assert_eq!(*h.view.notices.borrow(), vec![Notice::error(expected)]);
            assert_eq!(h.api.list_calls.get(), 0);
        }
    }

    #[test]
    fn test_unregister_transport_failure() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), Reply::Broken), true);
        h.run(|c| async move { c.submit_unregister("Chess Club", "michael@mergington.edu").await });

        assert_eq!(*h.view.notices.borrow(), vec![Notice::error("Failed to remove participant. Try again.")]);
        assert!(h.view.visible.get());
    }

    #[test]
    fn test_notice_hides_only_after_delay() {
        let api = FakeApi::new(Reply::Status(400, r#"{"detail": "Already registered"}"#), ok_unregister());
        let mut h = Harness::new(api, true);
        h.run(|c| async move { c.submit_signup("Chess Club", "x@y.com").await });

        assert_eq!(h.delay.requested(), vec![Duration::from_millis(5000)]);
        assert!(h.view.visible.get());

        h.settle();
        assert!(h.view.visible.get());

        h.delay.release(0);
        h.settle();
        assert!(!h.view.visible.get());
    }

    #[test]
    fn test_newer_notice_replaces_pending_auto_hide() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), ok_unregister()), true);
        h.run(|c| async move { c.submit_signup("Chess Club", "x@y.com").await });
        h.run(|c| async move { c.submit_unregister("Chess Club", "michael@mergington.edu").await });
        assert_eq!(h.delay.requested().len(), 2);

        h.delay.release(0);
        h.settle();
        assert!(h.view.visible.get(), "stale auto-hide must not hide the newer notice");

        h.delay.release(1);
        h.settle();
        assert!(!h.view.visible.get());
    }

    #[test]
    fn test_reload_runs_before_notice_times_out() {
        let mut h = Harness::new(FakeApi::new(ok_signup(), ok_unregister()), true);
        h.run(|c| async move { c.submit_signup("Chess Club", "x@y.com").await });

        // reload finished while the auto-hide is still pending
        assert_eq!(h.view.cards.borrow().len(), 1);
        assert!(h.view.visible.get());
    }
}

//! Activities API
//!
//! Backend contract for the board, organized as one trait plus the HTTP client.

mod http;
mod paths;

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{ActivityBoard, MutationReply};

pub use http::HttpActivityApi;
pub use paths::{list_path, signup_path, unregister_path};

/// Server answer to a signup or unregister request.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// 2xx response
    Accepted(MutationReply),
    /// Any other status; the body still carries the server's explanation
    Rejected { status: u16, reply: MutationReply },
}

impl MutationOutcome {
    pub fn from_status(status: u16, reply: MutationReply) -> Self {
        if (200..300).contains(&status) {
            MutationOutcome::Accepted(reply)
        } else {
            MutationOutcome::Rejected { status, reply }
        }
    }
}

/// Backend operations used by the board.
///
/// Futures are `!Send`: everything runs on the browser's single thread.
#[async_trait(?Send)]
pub trait ActivityApi {
    /// `GET /activities`
    async fn list_activities(&self) -> Result<ActivityBoard, ApiError>;

    /// `POST /activities/{name}/signup?email=...`
    async fn sign_up(&self, activity: &str, email: &str) -> Result<MutationOutcome, ApiError>;

    /// `DELETE /activities/{name}/participants?email=...`
    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationOutcome, ApiError>;
}

#[async_trait(?Send)]
impl<T: ActivityApi + ?Sized> ActivityApi for Rc<T> {
    async fn list_activities(&self) -> Result<ActivityBoard, ApiError> {
        (**self).list_activities().await
    }

    async fn sign_up(&self, activity: &str, email: &str) -> Result<MutationOutcome, ApiError> {
        (**self).sign_up(activity, email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationOutcome, ApiError> {
        (**self).unregister(activity, email).await
    }
}

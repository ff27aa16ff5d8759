//! UI Components

mod activity_list;
mod notice_banner;
mod signup_form;

pub use activity_list::ActivityList;
pub use notice_banner::NoticeBanner;
pub use signup_form::SignupForm;

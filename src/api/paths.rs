//! Endpoint paths
//!
//! Activity names and emails are encoded the way `encodeURIComponent` does it.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the unreserved URI component characters
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub fn list_path() -> &'static str {
    "/activities"
}

pub fn signup_path(activity: &str, email: &str) -> String {
    format!(
        "/activities/{}/signup?email={}",
        encode_component(activity),
        encode_component(email)
    )
}

pub fn unregister_path(activity: &str, email: &str) -> String {
    format!(
        "/activities/{}/participants?email={}",
        encode_component(activity),
        encode_component(email)
    )
}

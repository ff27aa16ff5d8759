//! Board Markup
//!
//! Renders the activity cards as an HTML string for the list container.
//! Every interpolated value goes through [`escape_html`].

use crate::models::{Activity, ActivityBoard};

pub const LOAD_FAILED_HTML: &str = "<p>Failed to load activities. Please try again later.</p>";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

/// Escape `& < > " '` for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Avatar label for a participant: "jane.doe@x" -> "JD", "bob@x" -> "B".
pub fn initials(identifier: &str) -> String {
    let local = identifier.split('@').next().unwrap_or_default();
    let mut tokens = local.split(['.', '_', '-']).filter(|t| !t.is_empty());

    let first = match tokens.next() {
        Some(token) => token.chars().next(),
        None => local.chars().next(),
    };
    let second = tokens.next().and_then(|t| t.chars().next());

    first
        .into_iter()
        .chain(second)
        .flat_map(char::to_uppercase)
        .collect()
}

/// All cards, in board order.
pub fn render_board(board: &ActivityBoard) -> String {
    let mut html = String::new();
    for (name, activity) in board.iter() {
        render_card(&mut html, name, activity);
    }
    html
}

fn render_card(html: &mut String, name: &str, activity: &Activity) {
    html.push_str(&format!(
        concat!(
            r#"<div class="activity-card">"#,
            "<h4>{name}</h4>",
            "<p>{description}</p>",
            "<p><strong>Schedule:</strong> {schedule}</p>",
            "<p><strong>Availability:</strong> {spots} spots left</p>",
            r#"<div class="participants-section"><h5>Participants</h5>"#,
        ),
        name = escape_html(name),
        description = escape_html(&activity.description),
        schedule = escape_html(&activity.schedule),
        spots = activity.spots_left(),
    ));
    render_roster(html, name, &activity.participants);
    html.push_str("</div></div>");
}

fn render_roster(html: &mut String, activity_name: &str, participants: &[String]) {
    if participants.is_empty() {
        html.push_str(r#"<p class="no-participants">No participants yet</p>"#);
        return;
    }

    let activity_attr = escape_html(activity_name);
    html.push_str(r#"<ul class="participants-list">"#);
    for participant in participants {
        let email = escape_html(participant);
        html.push_str(&format!(
            concat!(
                "<li>",
                r#"<span class="participant-avatar">{initials}</span>"#,
                r#"<span class="participant-email">{email}</span>"#,
                r#"<button class="participant-remove" data-email="{email}" data-activity="{activity}" title="Unregister participant">✕</button>"#,
                "</li>",
            ),
            initials = escape_html(&initials(participant)),
            email = email,
            activity = activity_attr,
        ));
    }
    html.push_str("</ul>");
}

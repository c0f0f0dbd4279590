//! View models and HTML rendering for the change list and history view.
//!
//! Escaping is enforced by construction: every piece of user or backend
//! text passes through [`escape`] on its way into markup, and the render
//! functions here are the only place markup is assembled. The browser layer
//! just assigns the finished fragment.

use chrono::DateTime;

use crate::models::{value_as_text, Change, HistoryItem};
use crate::review::ReviewSession;

/// Escape text for safe interpolation into HTML body or attribute
/// position.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Plain-text view of one proposed change, ready to render as a card.
#[derive(Debug, Clone)]
pub struct ChangeCardView {
    pub index: usize,
    pub field_path: String,
    pub section: String,
    pub reason: String,
    pub original: String,
    pub adapted: String,
    pub accepted: bool,
}

impl ChangeCardView {
    pub fn from_change(index: usize, change: &Change, accepted: bool) -> Self {
        Self {
            index,
            field_path: change.field_path.clone(),
            section: change.section.clone(),
            reason: change.reason.clone(),
            original: value_as_text(&change.original_value),
            adapted: value_as_text(&change.adapted_value),
            accepted,
        }
    }
}

/// Cards for every change in the session, in render order.
pub fn card_views(session: &ReviewSession) -> Vec<ChangeCardView> {
    session
        .changes()
        .iter()
        .enumerate()
        .map(|(idx, change)| {
            ChangeCardView::from_change(idx, change, session.is_accepted(&change.field_path))
        })
        .collect()
}

/// Render the change list. An empty list becomes exactly one empty-state
/// message and no cards.
pub fn render_change_cards(cards: &[ChangeCardView]) -> String {
    if cards.is_empty() {
        return r#"<p class="history-empty">No changes suggested. Your CV already matches well!</p>"#
            .to_string();
    }

    let mut html = String::new();
    for card in cards {
        let checked = if card.accepted { " checked" } else { "" };
        html.push_str(&format!(
            concat!(
                r#"<div class="change-card">"#,
                r#"<div class="change-header">"#,
                r#"<input type="checkbox" data-index="{index}" data-path="{path}"{checked}>"#,
                r#"<span class="change-section">{section}</span>"#,
                r#"<span class="change-path">{path}</span>"#,
                r#"<span class="change-reason">{reason}</span>"#,
                r#"</div>"#,
                r#"<div class="change-body">"#,
                r#"<div class="change-original"><div class="change-label">Original</div>{original}</div>"#,
                r#"<div class="change-adapted"><div class="change-label">Adapted</div>{adapted}</div>"#,
                r#"</div>"#,
                r#"</div>"#
            ),
            index = card.index,
            path = escape(&card.field_path),
            checked = checked,
            section = escape(&card.section),
            reason = escape(&card.reason),
            original = escape(&card.original),
            adapted = escape(&card.adapted),
        ));
    }
    html
}

/// Plain-text view of one history record.
#[derive(Debug, Clone)]
pub struct HistoryRowView {
    pub id: String,
    pub title: String,
    pub meta: String,
    pub tracking: Option<String>,
    pub offer_link: Option<String>,
}

impl HistoryRowView {
    pub fn from_item(item: &HistoryItem) -> Self {
        let meta = format!(
            "{} / {} \u{2014} {}",
            item.cv_version.to_uppercase(),
            item.language.to_uppercase(),
            format_timestamp(&item.created_at),
        );

        let mut parts: Vec<&str> = Vec::new();
        if let Some(company) = item.company_name.as_deref() {
            parts.push(company);
        }
        if let Some(position) = item.position_title.as_deref() {
            parts.push(position);
        }
        if let Some(date) = item.application_date.as_deref() {
            parts.push(date);
        }
        let tracking = if parts.is_empty() {
            None
        } else {
            Some(parts.join(" \u{b7} "))
        };

        Self {
            id: item.id.clone(),
            title: item.job_title.clone(),
            meta,
            tracking,
            offer_link: item.offer_link.clone(),
        }
    }
}

/// Render the backend's ISO 8601 timestamp as a local-style short form,
/// falling back to the raw string for anything unparsable.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Render the history list. An empty list becomes an explicit
/// empty-state message.
pub fn render_history_rows(rows: &[HistoryRowView]) -> String {
    if rows.is_empty() {
        return r#"<p class="history-empty">No history yet.</p>"#.to_string();
    }

    let mut html = String::new();
    for row in rows {
        let tracking = match &row.tracking {
            Some(text) => format!(r#"<span class="history-tracking">{}</span>"#, escape(text)),
            None => String::new(),
        };
        let link = match &row.offer_link {
            Some(url) => format!(
                r#"<a class="history-link" href="{}" target="_blank" rel="noopener">Offer</a>"#,
                escape(url)
            ),
            None => String::new(),
        };

        html.push_str(&format!(
            concat!(
                r#"<div class="history-item">"#,
                r#"<div class="history-info">"#,
                r#"<span class="history-title">{title}</span>"#,
                "{tracking}",
                r#"<span class="history-meta">{meta}</span>"#,
                r#"</div>"#,
                r#"<div class="history-actions">"#,
                "{link}",
                r#"<button class="secondary-btn" data-action="download" data-id="{id}">Download PDF</button>"#,
                r#"<button class="secondary-btn" data-action="delete" data-id="{id}">Delete</button>"#,
                r#"</div>"#,
                r#"</div>"#
            ),
            title = escape(&row.title),
            tracking = tracking,
            meta = escape(&row.meta),
            link = link,
            id = escape(&row.id),
        ));
    }
    html
}

/// Inline error shown in place of the history list when the fetch or
/// render fails.
pub fn render_inline_error(message: &str) -> String {
    format!(r#"<p class="error-message">{}</p>"#, escape(message))
}

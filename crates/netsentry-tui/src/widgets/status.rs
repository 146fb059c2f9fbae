//! Poll health indicator and data-age formatting for the status bar.

use std::time::Duration;

use chrono::{DateTime, Utc};
use ratatui::style::Style;
use ratatui::text::Span;

use netsentry_core::PollStatus;

use crate::theme;

/// `● live`, `◐ waiting` or `○ stale (N failures)`.
pub fn poll_indicator(status: &PollStatus) -> Span<'static> {
    if status.is_stale() {
        let n = status.consecutive_failures;
        let noun = if n == 1 { "failure" } else { "failures" };
        Span::styled(
            format!("○ stale ({n} {noun})"),
            Style::default().fg(theme::ERROR_RED),
        )
    } else if status.has_data() {
        Span::styled("● live", Style::default().fg(theme::SUCCESS_GREEN))
    } else {
        Span::styled("◐ waiting", Style::default().fg(theme::ELECTRIC_YELLOW))
    }
}

/// Whole-second age of `since` at `now`, e.g. "1m 5s". Clock skew reads as "0s".
pub fn fmt_age(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - since).to_std().map_or(0, |d| d.as_secs());
    humantime::format_duration(Duration::from_secs(secs)).to_string()
}

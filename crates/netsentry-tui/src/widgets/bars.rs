//! Horizontal bar rows: label, bar, trailing value. Used for every chart on
//! the dashboard; the protocol chart uses them as proportional shares in
//! place of a pie.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use netsentry_core::view::{BarSeries, Share};

use crate::theme;

const LABEL_WIDTH: usize = 14;
const VALUE_WIDTH: usize = 7;
/// Cells taken by indent, label column, separators and value column.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
const CHROME_WIDTH: u16 = (2 + LABEL_WIDTH + 1 + 1 + VALUE_WIDTH) as u16;

/// One row of a bar chart, already scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    /// Bar length relative to the full track, in `[0, 1]`.
    pub fraction: f64,
    pub value: String,
}

/// Model scores on a fixed 0–1 scale, shown with two decimals.
pub fn score_rows(series: &BarSeries<f64>) -> Vec<BarRow> {
    series
        .points
        .iter()
        .map(|p| BarRow {
            label: p.label.clone(),
            fraction: p.value.clamp(0.0, 1.0),
            value: format!("{:.2}", p.value),
        })
        .collect()
}

/// Counts scaled against the largest one.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn count_rows(series: &BarSeries<u64>) -> Vec<BarRow> {
    let max = series.points.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    series
        .points
        .iter()
        .map(|p| BarRow {
            label: p.label.clone(),
            fraction: p.value as f64 / max as f64,
            value: p.value.to_string(),
        })
        .collect()
}

/// Slices of a whole, labeled with their percentage.
pub fn share_rows(shares: &[Share]) -> Vec<BarRow> {
    shares
        .iter()
        .map(|s| BarRow {
            label: s.label.clone(),
            fraction: s.fraction,
            value: format!("{:.1}%", s.fraction * 100.0),
        })
        .collect()
}

/// Cells of bar for `fraction` of a `budget`-wide track.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn bar_cells(fraction: f64, budget: usize) -> usize {
    if !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    let cells = (fraction.min(1.0) * budget as f64).round() as usize;
    cells.min(budget)
}

/// Lay out `rows` for a panel `width` cells wide, cycling `colors`.
pub fn bar_lines(rows: &[BarRow], width: u16, colors: &[Color]) -> Vec<Line<'static>> {
    let budget = usize::from(width.saturating_sub(CHROME_WIDTH));

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let color = if colors.is_empty() {
                theme::DIM_WHITE
            } else {
                colors[i % colors.len()]
            };
            let name: String = row.label.chars().take(LABEL_WIDTH).collect();
            let bar = "█".repeat(bar_cells(row.fraction, budget));
            let pad = " ".repeat(budget.saturating_sub(bar.chars().count()));

            Line::from(vec![
                Span::styled(format!("  {name:<LABEL_WIDTH$} "), theme::body_text()),
                Span::styled(bar, Style::default().fg(color)),
                Span::raw(pad),
                Span::styled(format!(" {:>VALUE_WIDTH$}", row.value), theme::body_text()),
            ])
        })
        .collect()
}

//! Dashboard screen: the whole anomaly overview on one page.
//!
//! Layout:
//! ┌─ Network Traffic Anomaly Dashboard ──────────────────────────────┐
//! │ Last Analysis: 2025-01-25 14:02:11                                │
//! └───────────────────────────────────────────────────────────────────┘
//!  ⚠ alert banner (only while anomalies are reported)
//! ┌ Total Packets ┐┌ Total Anomalies ┐┌ Anomaly % ┐┌ Last Anomaly ─────┐
//! │     15230     ││       412       ││   12.35   ││ 2025-01-25 14:01 │
//! └───────────────┘└─────────────────┘└───────────┘└───────────────────┘
//! ┌ Model Performance ─┐┌ Protocol Distribution ┐┌ Anomalies by Type ─┐
//! │ accuracy ████ 0.97 ││ TCP  ██████  75.0%    ││ Port Scanning ██ 5 │
//! └────────────────────┘└───────────────────────┘└────────────────────┘
//! ┌ Top Source IPs ────────────────┐┌ Top Destination IPs ────────────┐
//! │  1. 127.0.0.1                  ││  1. 10.0.0.1                    │
//! └────────────────────────────────┘└─────────────────────────────────┘
//!
//! Before the first snapshot arrives only a loading throbber is drawn.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};

use netsentry_core::view::{DashboardModel, IpList, SummaryCard};
use netsentry_core::{DashboardView, Language, ViewModel};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::bars::{self, BarRow};

pub struct DashboardScreen {
    view: DashboardView,
    throbber_state: ThrobberState,
}

impl DashboardScreen {
    pub fn new(language: Language) -> Self {
        Self {
            view: DashboardView::new(language),
            throbber_state: ThrobberState::default(),
        }
    }

    fn panel(title: &str) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect, message: &'static str) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        let throbber = Throbber::default()
            .label(format!("  {message}"))
            .style(Style::default().fg(theme::NEON_CYAN))
            .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));

        frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());
    }

    fn render_ready(frame: &mut Frame, area: Rect, model: &DashboardModel) {
        let alert_height = u16::from(model.alert.is_some());

        let layout = Layout::vertical([
            Constraint::Length(3),            // header
            Constraint::Length(alert_height), // alert banner
            Constraint::Length(3),            // summary cards
            Constraint::Min(6),               // charts
            Constraint::Length(12),           // IP lists
        ])
        .split(area);

        Self::render_header(frame, layout[0], model);

        if let Some(alert) = &model.alert {
            frame.render_widget(
                Paragraph::new(Line::from(format!(" ⚠ {alert}"))).style(theme::alert_banner()),
                layout[1],
            );
        }

        Self::render_cards(frame, layout[2], &model.cards);

        let charts = Layout::horizontal([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(layout[3]);

        Self::render_bars(
            frame,
            charts[0],
            model.performance.title,
            &bars::score_rows(&model.performance),
            &[theme::PERFORMANCE_TEAL],
            model.no_data,
        );
        Self::render_bars(
            frame,
            charts[1],
            model.protocols.title,
            &bars::share_rows(&model.protocols.shares),
            theme::SHARE_SERIES,
            model.no_data,
        );
        Self::render_bars(
            frame,
            charts[2],
            model.anomalies_by_type.title,
            &bars::count_rows(&model.anomalies_by_type),
            &[theme::ANOMALY_RED],
            model.no_data,
        );

        let ips = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[4]);
        Self::render_ip_list(frame, ips[0], &model.source_ips, model.no_data);
        Self::render_ip_list(frame, ips[1], &model.destination_ips, model.no_data);
    }

    fn render_header(frame: &mut Frame, area: Rect, model: &DashboardModel) {
        let block = Self::panel(model.title).border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = Line::from(vec![
            Span::styled(format!(" {}: ", model.last_analysis_label), theme::key_hint()),
            Span::styled(model.analysis_timestamp.clone(), theme::body_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_cards(frame: &mut Frame, area: Rect, cards: &[SummaryCard; 4]) {
        let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

        for (card, column) in cards.iter().zip(columns.iter()) {
            let block = Self::panel(card.title);
            let inner = block.inner(*column);
            frame.render_widget(block, *column);
            frame.render_widget(
                Paragraph::new(
                    Line::from(Span::styled(card.value.clone(), theme::card_value())).centered(),
                ),
                inner,
            );
        }
    }

    fn render_bars(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        rows: &[BarRow],
        colors: &[Color],
        no_data: &str,
    ) {
        let block = Self::panel(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if rows.is_empty() {
            frame.render_widget(
                Paragraph::new(format!("  {no_data}")).style(theme::placeholder()),
                inner,
            );
            return;
        }

        let lines = bars::bar_lines(rows, inner.width, colors);
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_ip_list(frame: &mut Frame, area: Rect, list: &IpList, no_data: &str) {
        let block = Self::panel(list.title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if list.entries.is_empty() {
            frame.render_widget(
                Paragraph::new(format!("  {no_data}")).style(theme::placeholder()),
                inner,
            );
            return;
        }

        let lines: Vec<Line> = list
            .entries
            .iter()
            .enumerate()
            .map(|(i, ip)| {
                Line::from(vec![
                    Span::styled(format!("  {:>2}. ", i + 1), theme::key_hint()),
                    Span::styled(ip.clone(), theme::body_text()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SnapshotUpdated(snapshot) => {
                self.view.replace_snapshot(snapshot.clone());
            }
            Action::AlertsLoaded(alerts) => {
                self.view.set_alerts(alerts.clone());
            }
            Action::SetLanguage(language) => {
                self.view.set_language(*language);
            }
            Action::Tick if self.view.snapshot().is_none() => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match self.view.model() {
            ViewModel::Loading { message } => self.render_loading(frame, area, message),
            ViewModel::Ready(model) => Self::render_ready(frame, area, &model),
        }
    }
}

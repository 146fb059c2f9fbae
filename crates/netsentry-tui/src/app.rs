//! Application core: event loop, action dispatch, status bar and overlays.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use netsentry_core::{Language, PollStatus, PollerConfig, RefreshTrigger, spawn_poller};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Cadence, Event, EventReader};
use crate::screens::dashboard::DashboardScreen;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::status;

/// How long a toast stays on screen.
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    dashboard: DashboardScreen,
    running: bool,
    help_visible: bool,
    language: Language,
    poll_status: PollStatus,
    poller_config: PollerConfig,
    /// Set once the poller is running.
    refresh: Option<RefreshTrigger>,
    /// Action sender. Components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver, drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Parent token for the poller and data bridge.
    data_cancel: CancellationToken,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(poller_config: PollerConfig, language: Language) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            dashboard: DashboardScreen::new(language),
            running: true,
            help_visible: false,
            language,
            poll_status: PollStatus::default(),
            poller_config,
            refresh: None,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
            notification: None,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let source = Arc::new(self.poller_config.build_client()?);
        let poller = spawn_poller(
            Arc::clone(&source),
            self.poller_config.interval,
            self.data_cancel.child_token(),
        );
        self.refresh = Some(poller.refresh_trigger());

        let bridge = tokio::spawn(crate::data_bridge::spawn_data_bridge(
            source,
            poller,
            self.action_tx.clone(),
            self.data_cancel.clone(),
        ));

        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::spawn(Cadence::default());

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Stop the data bridge; it shuts the poller down before returning.
        self.data_cancel.cancel();
        events.stop();
        crate::data_bridge::join_logged(bridge, "data bridge").await;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here; anything
    /// else goes to the dashboard.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            });
        }

        if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('r') => return Ok(Some(Action::RefreshNow)),
                KeyCode::Char('l') => return Ok(Some(Action::SetLanguage(self.language.next()))),
                KeyCode::Char('e') => return Ok(Some(Action::SetLanguage(Language::En))),
                KeyCode::Char('k') => return Ok(Some(Action::SetLanguage(Language::Kn))),
                KeyCode::Char('h') => return Ok(Some(Action::SetLanguage(Language::Hi))),
                _ => {}
            }
        }

        self.dashboard.handle_key_event(key)
    }

    /// Process a single action: update app state and propagate to the dashboard.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
            }

            Action::Render => {}

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::RefreshNow => {
                if let Some(refresh) = &self.refresh {
                    refresh.fire();
                    self.action_tx
                        .send(Action::Notify(Notification::info("Refreshing…")))?;
                }
            }

            Action::PollStatusChanged(status) => {
                self.poll_status = status.clone();
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::SetLanguage(language) => {
                if *language != self.language {
                    debug!(from = %self.language, to = %language, "switching language");
                    self.language = *language;
                    self.forward(action)?;
                }
            }

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
                self.forward(action)?;
            }

            Action::SnapshotUpdated(_) | Action::AlertsLoaded(_) => {
                self.forward(action)?;
            }
        }
        Ok(())
    }

    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(follow_up) = self.dashboard.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // dashboard
            Constraint::Length(1), // status bar
        ])
        .split(area);

        self.dashboard.render(frame, layout[0]);
        self.render_status_bar(frame, layout[1]);

        // Overlays, last = topmost
        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Poll health, data age, language and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" "), status::poll_indicator(&self.poll_status)];

        if let Some(at) = self.poll_status.last_success {
            spans.push(Span::styled(
                format!("  updated {} ago", status::fmt_age(at, Utc::now())),
                theme::key_hint(),
            ));
        }

        spans.push(Span::styled(" │ ", theme::key_hint()));
        spans.push(Span::styled(
            format!("{} {}", self.language.code(), self.language.native_name()),
            Style::default().fg(theme::NEON_CYAN),
        ));
        spans.push(Span::styled(
            " │ l language  r refresh  ? help  q quit",
            theme::key_hint(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 48u16.min(area.width.saturating_sub(4));
        let help_height = 14u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let key = |k: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {k:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            key("l", "Cycle language"),
            key("e / k / h", "English / ಕನ್ನಡ / हिन्दी"),
            key("r", "Refresh now"),
            key("?", "This help"),
            key("q  Esc", "Quit"),
            key("Ctrl+c", "Quit"),
            Line::from(""),
            Line::from(Span::styled("  Esc or ? to close", theme::key_hint())),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len
            .saturating_add(6)
            .clamp(20, 60)
            .min(area.width.saturating_sub(2));
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 1); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Warning => (theme::ELECTRIC_YELLOW, "!"),
            NotificationLevel::Info => (theme::NEON_CYAN, "·"),
        };

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(notif.message.clone(), theme::body_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

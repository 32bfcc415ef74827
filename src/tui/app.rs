//! Central application state and the Elm-style event loop.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::core::store::Stores;

use super::events::{Action, AppEvent, BackendStatus, Focus};
use super::layout::AppLayout;
use super::services::Services;
use super::sidebar;
use super::theme;
use super::views::campaigns::CampaignsView;
use super::views::characters::CharactersView;
use super::views::dice::DiceView;
use super::views::monsters::MonstersView;
use super::views::sessions::SessionsView;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently focused page.
    pub focus: Focus,
    /// All domain stores.
    pub stores: Stores,
    /// Campaigns page state.
    pub campaigns: CampaignsView,
    /// Characters page state.
    pub characters: CharactersView,
    /// Monsters page state.
    pub monsters: MonstersView,
    /// Sessions page state.
    pub sessions: SessionsView,
    /// Dice roller page state.
    pub dice: DiceView,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Service reachability, shown in the status bar.
    backend: BackendStatus,
    /// Receiver for completion events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender for pushing events from within the app.
    #[allow(dead_code)]
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Network effect dispatcher.
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        services: Services,
    ) -> Self {
        Self {
            running: true,
            focus: Focus::Campaigns,
            stores: Stores::default(),
            campaigns: CampaignsView::new(),
            characters: CharactersView::new(),
            monsters: MonstersView::new(),
            sessions: SessionsView::new(),
            dice: DiceView::new(),
            show_help: false,
            backend: BackendStatus::default(),
            event_rx,
            event_tx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        // Probe the service and load the landing page.
        self.services.check_health();
        self.campaigns.on_focus(&mut self.stores, &self.services);

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {}
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Focused page first, so form typing never triggers
                // global keybindings.
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            // Completions route to every page (a submission may resolve
            // while another page has focus), then mutate the store.
            AppEvent::Store(store_event) => {
                self.campaigns.on_store_event(&store_event);
                self.characters.on_store_event(&store_event);
                self.monsters.on_store_event(&store_event);
                self.sessions.on_store_event(&store_event);
                self.stores.apply(store_event);
            }
            AppEvent::Health(result) => {
                self.backend = match result {
                    Ok(health) => {
                        log::info!("Service reachable: {}", health.message);
                        BackendStatus::Connected
                    }
                    Err(e) => {
                        log::warn!("Service unreachable: {e}");
                        BackendStatus::Unreachable
                    }
                };
            }
        }
    }

    /// Dispatch input to the focused page. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.focus {
            Focus::Campaigns => {
                self.campaigns
                    .handle_input(event, &mut self.stores, &self.services)
            }
            Focus::Characters => {
                self.characters
                    .handle_input(event, &mut self.stores, &self.services)
            }
            Focus::Monsters => {
                self.monsters
                    .handle_input(event, &mut self.stores, &self.services)
            }
            Focus::Sessions => {
                self.sessions
                    .handle_input(event, &mut self.stores, &self.services)
            }
            Focus::Dice => self
                .dice
                .handle_input(event, &mut self.stores, &self.services),
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                KeyCode::Char('1') => Some(Action::FocusCampaigns),
                KeyCode::Char('2') => Some(Action::FocusCharacters),
                KeyCode::Char('3') => Some(Action::FocusMonsters),
                KeyCode::Char('4') => Some(Action::FocusSessions),
                KeyCode::Char('5') => Some(Action::FocusDice),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::TabNext => self.set_focus(self.focus.next()),
            Action::TabPrev => self.set_focus(self.focus.prev()),
            Action::FocusCampaigns => self.set_focus(Focus::Campaigns),
            Action::FocusCharacters => self.set_focus(Focus::Characters),
            Action::FocusMonsters => self.set_focus(Focus::Monsters),
            Action::FocusSessions => self.set_focus(Focus::Sessions),
            Action::FocusDice => self.set_focus(Focus::Dice),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus {
            Focus::Campaigns => self.campaigns.on_focus(&mut self.stores, &self.services),
            Focus::Characters => self.characters.on_focus(&mut self.stores, &self.services),
            Focus::Monsters => self.monsters.on_focus(&mut self.stores, &self.services),
            Focus::Sessions => self.sessions.on_focus(&mut self.stores, &self.services),
            // The dice page has nothing to fetch on display.
            Focus::Dice => {}
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let layout = AppLayout::compute(frame.area());

        if let Some(sidebar_area) = layout.sidebar {
            sidebar::render(frame, sidebar_area, self.focus);
        }

        match self.focus {
            Focus::Campaigns => self.campaigns.render(frame, layout.main, &self.stores),
            Focus::Characters => self.characters.render(frame, layout.main, &self.stores),
            Focus::Monsters => self.monsters.render(frame, layout.main, &self.stores),
            Focus::Sessions => self.sessions.render(frame, layout.main, &self.stores),
            Focus::Dice => self.dice.render(frame, layout.main, &self.stores),
        }

        self.render_status_bar(frame, layout.status);

        if self.show_help {
            self.render_help(frame);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let backend_span = match self.backend {
            BackendStatus::Connected => Span::styled(
                self.backend.label(),
                ratatui::style::Style::default().fg(theme::SUCCESS),
            ),
            BackendStatus::Unreachable => Span::styled(
                self.backend.label(),
                ratatui::style::Style::default().fg(theme::ERROR),
            ),
            BackendStatus::Unknown => Span::styled(self.backend.label(), theme::dim()),
        };

        let line = Line::from(vec![
            Span::styled(" CC ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(self.focus.label(), theme::heading()),
            Span::raw("  "),
            backend_span,
            Span::raw("  "),
            Span::styled("[Tab]:pages  [?]:help  [q]:quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 46, 14);
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::raw(""),
            Line::styled("  Global", theme::heading()),
            Line::raw("    1-5 / Tab     switch page"),
            Line::raw("    ?             toggle this help"),
            Line::raw("    q / Ctrl+C    quit"),
            Line::raw(""),
            Line::styled("  Pages", theme::heading()),
            Line::raw("    n             open the create form"),
            Line::raw("    e             edit (sessions)"),
            Line::raw("    + / l         level up (characters)"),
            Line::raw("    / f x         search, filter, clear (monsters)"),
            Line::raw("    r             refetch from the service"),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(theme::block_focused("Help")),
            area,
        );
    }
}

/// A centered rect of fixed size, clamped to the frame.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clamps_to_frame() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(area, 100, 100);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 10);
    }
}

//! Session-notes page: recent-first list, create and edit forms.

use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::api::session::{Session, SessionPayload};
use crate::core::store::{selectors, SessionEvent, StoreEvent, Stores};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::text_field::TextField;

/// Parse the date field: `YYYY-MM-DD HH:MM` or a bare `YYYY-MM-DD`
/// (midnight).
fn parse_session_date(input: &str) -> Result<NaiveDateTime, String> {
    let input = input.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| "Date must be YYYY-MM-DD or YYYY-MM-DD HH:MM".to_string())
}

/// Session form; doubles as the edit form when `editing` is set.
pub struct SessionForm {
    pub date: TextField,
    pub notes: TextField,
    pub campaign_index: usize,
    pub field: usize,
    /// Id of the session being edited; None when creating.
    pub editing: Option<i64>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl SessionForm {
    const FIELD_COUNT: usize = 3;
    const CAMPAIGN_FIELD: usize = 2;

    fn new() -> Self {
        Self {
            date: TextField::new("Date"),
            notes: TextField::new("Notes"),
            campaign_index: 0,
            field: 0,
            editing: None,
            submitting: false,
            error: None,
        }
    }

    fn for_edit(session: &Session, campaign_ids: &[i64]) -> Self {
        let mut form = Self::new();
        form.editing = Some(session.id);
        form.date
            .set_value(session.date.format("%Y-%m-%d %H:%M").to_string());
        form.notes.set_value(session.notes.clone());
        form.campaign_index = campaign_ids
            .iter()
            .position(|&id| id == session.campaign_id)
            .unwrap_or(0);
        form
    }

    /// Typed validation: a campaign must be picked and the date must
    /// parse. Notes may be empty.
    pub fn validate(&self, campaign_ids: &[i64]) -> Result<SessionPayload, String> {
        let campaign_id = campaign_ids
            .get(self.campaign_index)
            .copied()
            .ok_or_else(|| "Pick a campaign first".to_string())?;
        let date = parse_session_date(self.date.value())?;
        Ok(SessionPayload {
            campaign_id,
            date,
            notes: self.notes.value().to_string(),
        })
    }

    fn focused_text_field(&mut self) -> Option<&mut TextField> {
        match self.field {
            0 => Some(&mut self.date),
            1 => Some(&mut self.notes),
            _ => None,
        }
    }
}

/// Page controller for session notes.
pub struct SessionsView {
    form: Option<SessionForm>,
    selected: usize,
    /// Restrict the list to one campaign (cycled with `c`).
    campaign_filter: Option<i64>,
}

impl SessionsView {
    pub fn new() -> Self {
        Self {
            form: None,
            selected: 0,
            campaign_filter: None,
        }
    }

    pub fn on_focus(&mut self, stores: &mut Stores, services: &Services) {
        if stores.sessions.status().is_idle() {
            services.fetch_sessions(&mut stores.sessions);
        }
        if stores.campaigns.status().is_idle() {
            services.fetch_campaigns(&mut stores.campaigns);
        }
    }

    /// Sessions shown: optionally one campaign, always date-descending.
    fn visible<'a>(&self, stores: &'a Stores) -> Vec<&'a Session> {
        match self.campaign_filter {
            Some(id) => {
                let in_campaign = selectors::sessions_in_campaign(stores.sessions.all(), id);
                let mut sorted: Vec<&Session> = in_campaign;
                sorted.sort_by(|a, b| b.date.cmp(&a.date));
                sorted
            }
            None => selectors::recent_sessions(stores.sessions.all(), usize::MAX),
        }
    }

    fn cycle_campaign_filter(&mut self, stores: &Stores) {
        let ids: Vec<i64> = stores.campaigns.all().iter().map(|c| c.id).collect();
        self.campaign_filter = match self.campaign_filter {
            None => ids.first().copied(),
            Some(current) => ids
                .iter()
                .position(|&id| id == current)
                .and_then(|i| ids.get(i + 1))
                .copied(),
        };
        self.selected = 0;
    }

    pub fn handle_input(
        &mut self,
        event: &Event,
        stores: &mut Stores,
        services: &Services,
    ) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        if self.form.is_some() {
            if *code == KeyCode::Esc {
                self.form = None;
                return true;
            }
            if let Some(form) = self.form.as_mut() {
                let campaigns = stores.campaigns.all();
                match code {
                    KeyCode::Enter => {
                        if !form.submitting {
                            let ids: Vec<i64> = campaigns.iter().map(|c| c.id).collect();
                            match form.validate(&ids) {
                                Ok(payload) => {
                                    form.submitting = true;
                                    form.error = None;
                                    match form.editing {
                                        Some(id) => services.update_session(id, payload),
                                        None => services.create_session(payload),
                                    }
                                }
                                Err(message) => form.error = Some(message),
                            }
                        }
                    }
                    KeyCode::Tab | KeyCode::Down => {
                        form.field = (form.field + 1) % SessionForm::FIELD_COUNT;
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        form.field =
                            (form.field + SessionForm::FIELD_COUNT - 1) % SessionForm::FIELD_COUNT;
                    }
                    KeyCode::Left if form.field == SessionForm::CAMPAIGN_FIELD => {
                        if !campaigns.is_empty() {
                            form.campaign_index =
                                (form.campaign_index + campaigns.len() - 1) % campaigns.len();
                        }
                    }
                    KeyCode::Right if form.field == SessionForm::CAMPAIGN_FIELD => {
                        if !campaigns.is_empty() {
                            form.campaign_index = (form.campaign_index + 1) % campaigns.len();
                        }
                    }
                    _ => {
                        if let (Some(field), Event::Key(key)) = (form.focused_text_field(), event)
                        {
                            field.handle_key(key);
                        }
                    }
                }
            }
            return true;
        }

        match code {
            KeyCode::Char('n') => {
                self.form = Some(SessionForm::new());
                true
            }
            KeyCode::Char('e') => {
                let ids: Vec<i64> = stores.campaigns.all().iter().map(|c| c.id).collect();
                if let Some(session) = self.visible(stores).get(self.selected).copied() {
                    self.form = Some(SessionForm::for_edit(session, &ids));
                }
                true
            }
            KeyCode::Char('c') => {
                self.cycle_campaign_filter(stores);
                true
            }
            KeyCode::Char('r') => {
                services.fetch_sessions(&mut stores.sessions);
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.visible(stores).len();
                if len > 0 && self.selected < len - 1 {
                    self.selected += 1;
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn on_store_event(&mut self, event: &StoreEvent) {
        let StoreEvent::Sessions(event) = event else {
            return;
        };
        match event {
            SessionEvent::CreateFinished(Ok(_)) | SessionEvent::UpdateFinished(Ok(_)) => {
                self.form = None;
            }
            SessionEvent::CreateFinished(Err(e)) | SessionEvent::UpdateFinished(Err(e)) => {
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                    form.error = Some(e.to_string());
                }
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, stores: &Stores) {
        let store = &stores.sessions;
        let form_height = if self.form.is_some() { 7 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(form_height),
        ])
        .split(area);

        let filter_note = self
            .campaign_filter
            .and_then(|id| {
                stores
                    .campaigns
                    .all()
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| format!("  — {}", c.name))
            })
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Session Notes", theme::title()),
                Span::styled(filter_note, theme::highlight()),
            ])),
            chunks[0],
        );

        let mut lines: Vec<Line> = Vec::new();
        if let Some(error) = store.error() {
            lines.push(Line::styled(format!("Error: {error}"), theme::error_banner()));
        }

        if store.status().is_loading() && store.all().is_empty() {
            lines.push(Line::styled("Loading sessions…", theme::dim()));
        } else {
            let visible = self.visible(stores);
            if visible.is_empty() {
                lines.push(Line::styled(
                    "No sessions logged — press [n] after game night.",
                    theme::muted(),
                ));
            }
            for (i, session) in visible.iter().enumerate() {
                let marker = if i == self.selected { "▸ " } else { "  " };
                let style = if i == self.selected {
                    theme::highlight()
                } else {
                    Default::default()
                };
                let campaign_name = stores
                    .campaigns
                    .all()
                    .iter()
                    .find(|c| c.id == session.campaign_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                lines.push(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(session.date.format("%Y-%m-%d %H:%M").to_string(), style),
                    Span::styled(format!("  {campaign_name}"), theme::muted()),
                ]));
                if i == self.selected && !session.notes.is_empty() {
                    lines.push(Line::styled(format!("    {}", session.notes), theme::muted()));
                }
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "[n]:new  [e]:edit  [c]:campaign filter  [r]:refresh  [j/k]:move",
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        if let Some(form) = &self.form {
            let campaigns = stores.campaigns.all();
            let campaign_label = campaigns
                .get(form.campaign_index)
                .map(|c| c.name.as_str())
                .unwrap_or("— no campaigns fetched —");
            let picker_focused = form.field == SessionForm::CAMPAIGN_FIELD;
            let picker_style = if picker_focused {
                theme::highlight()
            } else {
                theme::muted()
            };
            let title = if form.editing.is_some() {
                "Edit Session"
            } else {
                "New Session"
            };

            let mut form_lines = vec![
                form.date.render_line(form.field == 0),
                form.notes.render_line(form.field == 1),
                Line::from(vec![
                    Span::styled(format!("  {:<12}", "Campaign"), picker_style),
                    Span::styled(format!("‹ {campaign_label} ›"), picker_style),
                ]),
            ];
            if let Some(error) = &form.error {
                form_lines.push(Line::styled(format!("  {error}"), theme::error_banner()));
            } else if form.submitting {
                form_lines.push(Line::styled("  Saving…", theme::dim()));
            } else {
                form_lines.push(Line::styled(
                    "  [Enter]:save  [Esc]:cancel  [Tab]:next  [←/→]:campaign",
                    theme::key_hint(),
                ));
            }
            frame.render_widget(
                Paragraph::new(form_lines).block(theme::block_focused(title)),
                chunks[2],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_only_parses_to_midnight() {
        let dt = parse_session_date("2024-01-05").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_date_time_parses() {
        let dt = parse_session_date("2024-01-05 19:30").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-05 19:30");
    }

    #[test]
    fn test_garbage_date_rejected() {
        assert!(parse_session_date("next tuesday").is_err());
    }

    #[test]
    fn test_empty_notes_allowed() {
        let mut form = SessionForm::new();
        form.date.set_value("2024-01-05");
        let payload = form.validate(&[3]).unwrap();
        assert_eq!(payload.notes, "");
        assert_eq!(payload.campaign_id, 3);
    }
}

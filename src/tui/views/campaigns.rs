//! Campaigns page: list plus a create-only form panel.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::store::{CampaignEvent, StoreEvent, Stores};
use crate::core::api::campaign::CampaignDraft;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::text_field::TextField;

/// New-campaign form state. Stays open and populated on failure.
pub struct CampaignForm {
    pub name: TextField,
    pub description: TextField,
    /// Focused field index (0 = name, 1 = description).
    pub field: usize,
    pub submitting: bool,
    pub error: Option<String>,
}

impl CampaignForm {
    const FIELD_COUNT: usize = 2;

    fn new() -> Self {
        Self {
            name: TextField::new("Name"),
            description: TextField::new("Description"),
            field: 0,
            submitting: false,
            error: None,
        }
    }

    /// Typed validation mirroring the form constraints: name required.
    fn validate(&self) -> Result<CampaignDraft, String> {
        if self.name.is_empty() {
            return Err("Campaign name is required".to_string());
        }
        Ok(CampaignDraft {
            name: self.name.value().trim().to_string(),
            description: self.description.value().trim().to_string(),
        })
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.field {
            0 => &mut self.name,
            _ => &mut self.description,
        }
    }
}

/// Page controller for the campaign list.
pub struct CampaignsView {
    form: Option<CampaignForm>,
    selected: usize,
}

impl CampaignsView {
    pub fn new() -> Self {
        Self {
            form: None,
            selected: 0,
        }
    }

    /// Fetch on first display; later focuses reuse the cached list.
    pub fn on_focus(&mut self, stores: &mut Stores, services: &Services) {
        if stores.campaigns.status().is_idle() {
            services.fetch_campaigns(&mut stores.campaigns);
        }
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
                match code {
                    KeyCode::Enter => {
                        if !form.submitting {
                            match form.validate() {
                                Ok(draft) => {
                                    form.submitting = true;
                                    form.error = None;
                                    services.create_campaign(draft);
                                }
                                Err(message) => form.error = Some(message),
                            }
                        }
                    }
                    KeyCode::Tab | KeyCode::Down => {
                        form.field = (form.field + 1) % CampaignForm::FIELD_COUNT;
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        form.field = (form.field + CampaignForm::FIELD_COUNT - 1)
                            % CampaignForm::FIELD_COUNT;
                    }
                    _ => {
                        if let Event::Key(key) = event {
                            form.focused_field().handle_key(key);
                        }
                    }
                }
            }
            return true;
        }

        match code {
            KeyCode::Char('n') => {
                self.form = Some(CampaignForm::new());
                true
            }
            KeyCode::Char('r') => {
                services.fetch_campaigns(&mut stores.campaigns);
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = stores.campaigns.all().len();
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

    /// Close the form only when the create actually succeeded.
    pub fn on_store_event(&mut self, event: &StoreEvent) {
        let StoreEvent::Campaigns(event) = event else {
            return;
        };
        match event {
            CampaignEvent::CreateFinished(Ok(_)) => {
                self.form = None;
            }
            CampaignEvent::CreateFinished(Err(e)) => {
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                    form.error = Some(e.to_string());
                }
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, stores: &Stores) {
        let store = &stores.campaigns;
        let form_height = if self.form.is_some() { 7 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(form_height),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::styled("Campaigns", theme::title())),
            chunks[0],
        );

        let mut lines: Vec<Line> = Vec::new();
        if let Some(error) = store.error() {
            lines.push(Line::styled(format!("Error: {error}"), theme::error_banner()));
        }

        if store.status().is_loading() && store.all().is_empty() {
            lines.push(Line::styled("Loading campaigns…", theme::dim()));
        } else if store.all().is_empty() {
            lines.push(Line::styled(
                "No campaigns yet — press [n] to start one.",
                theme::muted(),
            ));
        } else {
            for (i, campaign) in store.all().iter().enumerate() {
                let marker = if i == self.selected { "▸ " } else { "  " };
                let style = if i == self.selected {
                    theme::highlight()
                } else {
                    Default::default()
                };
                let started = campaign
                    .start_date
                    .as_deref()
                    .map(|d| format!("  started {}", &d[..d.len().min(10)]))
                    .unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(campaign.name.clone(), style),
                    Span::styled(started, theme::dim()),
                ]));
                if i == self.selected && !campaign.description.is_empty() {
                    lines.push(Line::styled(
                        format!("    {}", campaign.description),
                        theme::muted(),
                    ));
                }
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "[n]:new  [r]:refresh  [j/k]:move",
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        if let Some(form) = &self.form {
            let mut form_lines = vec![
                form.name.render_line(form.field == 0),
                form.description.render_line(form.field == 1),
                Line::raw(""),
            ];
            if let Some(error) = &form.error {
                form_lines.push(Line::styled(format!("  {error}"), theme::error_banner()));
            } else if form.submitting {
                form_lines.push(Line::styled("  Saving…", theme::dim()));
            } else {
                form_lines.push(Line::styled(
                    "  [Enter]:save  [Esc]:cancel  [Tab]:next field",
                    theme::key_hint(),
                ));
            }
            frame.render_widget(
                Paragraph::new(form_lines).block(theme::block_focused("New Campaign")),
                chunks[2],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected_before_submission() {
        let mut form = CampaignForm::new();
        form.description.set_value("A heist in Waterdeep");
        assert!(form.validate().is_err());

        form.name.set_value("Dragon Heist");
        let draft = form.validate().unwrap();
        assert_eq!(draft.name, "Dragon Heist");
    }
}

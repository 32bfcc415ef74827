//! Characters page: roster list, create form, and a level-up action.
//!
//! The campaign picker needs the campaign list, so focusing this page
//! fetches campaigns as well as characters.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::api::character::CharacterPayload;
use crate::core::store::{CharacterEvent, StoreEvent, Stores};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::text_field::TextField;

/// Character levels the service accepts.
pub const LEVEL_MIN: i32 = 1;
pub const LEVEL_MAX: i32 = 20;

/// New-character form state.
pub struct CharacterForm {
    pub name: TextField,
    pub race: TextField,
    pub class: TextField,
    pub level: TextField,
    pub hit_points: TextField,
    /// Index into the fetched campaign list (cycled with ←/→).
    pub campaign_index: usize,
    /// Focused field index; the campaign picker is the last field.
    pub field: usize,
    pub submitting: bool,
    pub error: Option<String>,
}

impl CharacterForm {
    const FIELD_COUNT: usize = 6;
    const CAMPAIGN_FIELD: usize = 5;

    fn new() -> Self {
        let mut level = TextField::new("Level");
        level.set_value("1");
        let mut hit_points = TextField::new("Hit Points");
        hit_points.set_value("10");
        Self {
            name: TextField::new("Name"),
            race: TextField::new("Race"),
            class: TextField::new("Class"),
            level,
            hit_points,
            campaign_index: 0,
            field: 0,
            submitting: false,
            error: None,
        }
    }

    /// Typed validation mirroring the form constraints. A level outside
    /// [1,20] never reaches the store.
    pub fn validate(&self, campaign_ids: &[i64]) -> Result<CharacterPayload, String> {
        if self.name.is_empty() {
            return Err("Character name is required".to_string());
        }
        let level: i32 = self
            .level
            .value()
            .trim()
            .parse()
            .map_err(|_| "Level must be a whole number".to_string())?;
        if !(LEVEL_MIN..=LEVEL_MAX).contains(&level) {
            return Err(format!("Level must be between {LEVEL_MIN} and {LEVEL_MAX}"));
        }
        let hit_points: i32 = self
            .hit_points
            .value()
            .trim()
            .parse()
            .map_err(|_| "Hit points must be a whole number".to_string())?;
        if hit_points < 0 {
            return Err("Hit points cannot be negative".to_string());
        }
        let campaign_id = campaign_ids
            .get(self.campaign_index)
            .copied()
            .ok_or_else(|| "Pick a campaign first".to_string())?;

        Ok(CharacterPayload {
            name: self.name.value().trim().to_string(),
            race: self.race.value().trim().to_string(),
            character_class: self.class.value().trim().to_string(),
            level,
            hit_points,
            campaign_id,
        })
    }

    fn focused_text_field(&mut self) -> Option<&mut TextField> {
        match self.field {
            0 => Some(&mut self.name),
            1 => Some(&mut self.race),
            2 => Some(&mut self.class),
            3 => Some(&mut self.level),
            4 => Some(&mut self.hit_points),
            _ => None,
        }
    }
}

/// Page controller for the character roster.
pub struct CharactersView {
    form: Option<CharacterForm>,
    selected: usize,
    /// Character with a level-up request in flight.
    updating_id: Option<i64>,
    /// Inline error from a failed level-up.
    update_error: Option<String>,
}

impl CharactersView {
    pub fn new() -> Self {
        Self {
            form: None,
            selected: 0,
            updating_id: None,
            update_error: None,
        }
    }

    pub fn on_focus(&mut self, stores: &mut Stores, services: &Services) {
        if stores.characters.status().is_idle() {
            services.fetch_characters(&mut stores.characters);
        }
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
                let campaigns = stores.campaigns.all();
                match code {
                    KeyCode::Enter => {
                        if !form.submitting {
                            let ids: Vec<i64> = campaigns.iter().map(|c| c.id).collect();
                            match form.validate(&ids) {
                                Ok(payload) => {
                                    form.submitting = true;
                                    form.error = None;
                                    services.create_character(payload);
                                }
                                Err(message) => form.error = Some(message),
                            }
                        }
                    }
                    KeyCode::Tab | KeyCode::Down => {
                        form.field = (form.field + 1) % CharacterForm::FIELD_COUNT;
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        form.field = (form.field + CharacterForm::FIELD_COUNT - 1)
                            % CharacterForm::FIELD_COUNT;
                    }
                    KeyCode::Left if form.field == CharacterForm::CAMPAIGN_FIELD => {
                        if !campaigns.is_empty() {
                            form.campaign_index = (form.campaign_index + campaigns.len() - 1)
                                % campaigns.len();
                        }
                    }
                    KeyCode::Right if form.field == CharacterForm::CAMPAIGN_FIELD => {
                        if !campaigns.is_empty() {
                            form.campaign_index = (form.campaign_index + 1) % campaigns.len();
                        }
                    }
                    _ => {
                        if let (Some(field), Event::Key(key)) =
                            (form.focused_text_field(), event)
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
                self.form = Some(CharacterForm::new());
                true
            }
            KeyCode::Char('r') => {
                services.fetch_characters(&mut stores.characters);
                true
            }
            KeyCode::Char('+') | KeyCode::Char('l') => {
                self.level_up(stores, services);
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = stores.characters.all().len();
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

    /// Full-record replace with level+1, guarded by the level cap.
    fn level_up(&mut self, stores: &mut Stores, services: &Services) {
        if self.updating_id.is_some() {
            return;
        }
        let Some(character) = stores.characters.all().get(self.selected) else {
            return;
        };
        if character.level >= LEVEL_MAX {
            self.update_error = Some(format!("{} is already level {LEVEL_MAX}", character.name));
            return;
        }
        self.updating_id = Some(character.id);
        self.update_error = None;
        services.update_character(
            character.id,
            CharacterPayload {
                name: character.name.clone(),
                race: character.race.clone(),
                character_class: character.character_class.clone(),
                level: character.level + 1,
                hit_points: character.hit_points,
                campaign_id: character.campaign_id,
            },
        );
    }

    pub fn on_store_event(&mut self, event: &StoreEvent) {
        let StoreEvent::Characters(event) = event else {
            return;
        };
        match event {
            CharacterEvent::CreateFinished(Ok(_)) => {
                self.form = None;
            }
            CharacterEvent::CreateFinished(Err(e)) => {
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                    form.error = Some(e.to_string());
                }
            }
            CharacterEvent::UpdateFinished(Ok(_)) => {
                self.updating_id = None;
            }
            CharacterEvent::UpdateFinished(Err(e)) => {
                self.updating_id = None;
                self.update_error = Some(e.to_string());
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, stores: &Stores) {
        let store = &stores.characters;
        let form_height = if self.form.is_some() { 10 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(form_height),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::styled("Characters", theme::title())),
            chunks[0],
        );

        let mut lines: Vec<Line> = Vec::new();
        for error in [store.error(), self.update_error.as_deref()]
            .into_iter()
            .flatten()
        {
            lines.push(Line::styled(format!("Error: {error}"), theme::error_banner()));
        }

        if store.status().is_loading() && store.all().is_empty() {
            lines.push(Line::styled("Loading characters…", theme::dim()));
        } else if store.all().is_empty() {
            lines.push(Line::styled(
                "No characters yet — press [n] to roll one up.",
                theme::muted(),
            ));
        } else {
            for (i, character) in store.all().iter().enumerate() {
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
                    .find(|c| c.id == character.campaign_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                let busy = if self.updating_id == Some(character.id) {
                    "  (updating…)"
                } else {
                    ""
                };
                lines.push(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(character.name.clone(), style),
                    Span::styled(
                        format!(
                            "  lvl {} {} {}  hp {}  — {}{}",
                            character.level,
                            character.race,
                            character.character_class,
                            character.hit_points,
                            campaign_name,
                            busy,
                        ),
                        theme::muted(),
                    ),
                ]));
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "[n]:new  [+]:level up  [r]:refresh  [j/k]:move",
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        if let Some(form) = &self.form {
            let campaigns = stores.campaigns.all();
            let campaign_label = campaigns
                .get(form.campaign_index)
                .map(|c| c.name.as_str())
                .unwrap_or("— no campaigns fetched —");
            let picker_focused = form.field == CharacterForm::CAMPAIGN_FIELD;
            let picker_style = if picker_focused {
                theme::highlight()
            } else {
                theme::muted()
            };

            let mut form_lines = vec![
                form.name.render_line(form.field == 0),
                form.race.render_line(form.field == 1),
                form.class.render_line(form.field == 2),
                form.level.render_line(form.field == 3),
                form.hit_points.render_line(form.field == 4),
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
                Paragraph::new(form_lines).block(theme::block_focused("New Character")),
                chunks[2],
            );
        }
    }
}

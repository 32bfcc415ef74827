//! Monster encyclopedia page: searchable list, CR filter, create form.
//!
//! Filtering is recomputed from the cached collection on every render
//! through the pure selectors — the store itself is never mutated by a
//! filter change.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::api::monster::{Monster, MonsterPayload};
use crate::core::store::{selectors, MonsterEvent, StoreEvent, Stores};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::text_field::TextField;

/// New-monster form state.
pub struct MonsterForm {
    pub name: TextField,
    pub challenge_rating: TextField,
    pub hit_points: TextField,
    pub armor_class: TextField,
    pub description: TextField,
    pub field: usize,
    pub submitting: bool,
    pub error: Option<String>,
}

impl MonsterForm {
    const FIELD_COUNT: usize = 5;

    fn new() -> Self {
        let mut challenge_rating = TextField::new("CR");
        challenge_rating.set_value("0");
        let mut hit_points = TextField::new("Hit Points");
        hit_points.set_value("10");
        let mut armor_class = TextField::new("Armor Class");
        armor_class.set_value("10");
        Self {
            name: TextField::new("Name"),
            challenge_rating,
            hit_points,
            armor_class,
            description: TextField::new("Description"),
            field: 0,
            submitting: false,
            error: None,
        }
    }

    /// Typed validation mirroring the form constraints: name required,
    /// CR non-negative and quantized to eighths.
    pub fn validate(&self) -> Result<MonsterPayload, String> {
        if self.name.is_empty() {
            return Err("Monster name is required".to_string());
        }
        let challenge_rating: f64 = self
            .challenge_rating
            .value()
            .trim()
            .parse()
            .map_err(|_| "Challenge rating must be a number".to_string())?;
        if challenge_rating < 0.0 {
            return Err("Challenge rating cannot be negative".to_string());
        }
        if (challenge_rating * 8.0).fract() != 0.0 {
            return Err("Challenge rating must be a multiple of 0.125".to_string());
        }
        let hit_points: i32 = self
            .hit_points
            .value()
            .trim()
            .parse()
            .map_err(|_| "Hit points must be a whole number".to_string())?;
        let armor_class: i32 = self
            .armor_class
            .value()
            .trim()
            .parse()
            .map_err(|_| "Armor class must be a whole number".to_string())?;
        if hit_points < 0 || armor_class < 0 {
            return Err("Hit points and armor class cannot be negative".to_string());
        }

        Ok(MonsterPayload {
            name: self.name.value().trim().to_string(),
            challenge_rating,
            hit_points,
            armor_class,
            description: self.description.value().trim().to_string(),
        })
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.field {
            0 => &mut self.name,
            1 => &mut self.challenge_rating,
            2 => &mut self.hit_points,
            3 => &mut self.armor_class,
            _ => &mut self.description,
        }
    }
}

/// Page controller for the monster encyclopedia.
pub struct MonstersView {
    form: Option<MonsterForm>,
    selected: usize,
    /// Live substring filter; edited in place while the list shows.
    search: TextField,
    searching: bool,
    /// Exact-CR filter, cycled over the CRs present in the collection.
    cr_filter: Option<f64>,
}

impl MonstersView {
    pub fn new() -> Self {
        Self {
            form: None,
            selected: 0,
            search: TextField::new("Search"),
            searching: false,
            cr_filter: None,
        }
    }

    pub fn on_focus(&mut self, stores: &mut Stores, services: &Services) {
        if stores.monsters.status().is_idle() {
            services.fetch_monsters(&mut stores.monsters);
        }
    }

    /// Visible monsters after search and CR filters.
    fn filtered<'a>(&self, stores: &'a Stores) -> Vec<&'a Monster> {
        let by_search = selectors::filter_by_search(stores.monsters.all(), self.search.value());
        match self.cr_filter {
            Some(cr) => by_search
                .into_iter()
                .filter(|m| m.challenge_rating == cr)
                .collect(),
            None => by_search,
        }
    }

    /// Cycle the CR filter through the distinct ratings present.
    fn cycle_cr_filter(&mut self, stores: &Stores) {
        let mut ratings: Vec<f64> = stores
            .monsters
            .all()
            .iter()
            .map(|m| m.challenge_rating)
            .collect();
        ratings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        ratings.dedup();
        if ratings.is_empty() {
            self.cr_filter = None;
            return;
        }
        self.cr_filter = match self.cr_filter {
            None => Some(ratings[0]),
            Some(current) => ratings
                .iter()
                .position(|&r| r == current)
                .and_then(|i| ratings.get(i + 1))
                .copied(),
        };
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
                                Ok(payload) => {
                                    form.submitting = true;
                                    form.error = None;
                                    services.create_monster(payload);
                                }
                                Err(message) => form.error = Some(message),
                            }
                        }
                    }
                    KeyCode::Tab | KeyCode::Down => {
                        form.field = (form.field + 1) % MonsterForm::FIELD_COUNT;
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        form.field =
                            (form.field + MonsterForm::FIELD_COUNT - 1) % MonsterForm::FIELD_COUNT;
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

        if self.searching {
            match code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.searching = false;
                }
                _ => {
                    if let Event::Key(key) = event {
                        self.search.handle_key(key);
                        self.selected = 0;
                    }
                }
            }
            return true;
        }

        match code {
            KeyCode::Char('n') => {
                self.form = Some(MonsterForm::new());
                true
            }
            KeyCode::Char('/') => {
                self.searching = true;
                true
            }
            KeyCode::Char('f') => {
                self.cycle_cr_filter(stores);
                self.selected = 0;
                true
            }
            KeyCode::Char('x') => {
                self.search.clear();
                self.cr_filter = None;
                self.selected = 0;
                true
            }
            KeyCode::Char('r') => {
                services.fetch_monsters(&mut stores.monsters);
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.filtered(stores).len();
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
        let StoreEvent::Monsters(event) = event else {
            return;
        };
        match event {
            MonsterEvent::CreateFinished(Ok(_)) => {
                self.form = None;
            }
            MonsterEvent::CreateFinished(Err(e)) => {
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                    form.error = Some(e.to_string());
                }
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, stores: &Stores) {
        let store = &stores.monsters;
        let form_height = if self.form.is_some() { 10 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(form_height),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::styled("Monster Encyclopedia", theme::title())),
            chunks[0],
        );

        let filter_note = match self.cr_filter {
            Some(cr) => format!("  CR = {cr}"),
            None => String::new(),
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Search: ", theme::muted()),
                Span::raw(self.search.value()),
                Span::styled(if self.searching { "█" } else { "" }, theme::border_focused()),
                Span::styled(filter_note, theme::highlight()),
            ])),
            chunks[1],
        );

        let mut lines: Vec<Line> = Vec::new();
        if let Some(error) = store.error() {
            lines.push(Line::styled(format!("Error: {error}"), theme::error_banner()));
        }

        if store.status().is_loading() && store.all().is_empty() {
            lines.push(Line::styled("Loading monsters…", theme::dim()));
        } else {
            let visible = self.filtered(stores);
            if visible.is_empty() {
                lines.push(Line::styled("No monsters match.", theme::muted()));
            }
            for (i, monster) in visible.iter().enumerate() {
                let marker = if i == self.selected { "▸ " } else { "  " };
                let style = if i == self.selected {
                    theme::highlight()
                } else {
                    Default::default()
                };
                lines.push(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(monster.name.clone(), style),
                    Span::styled(
                        format!(
                            "  CR {}  hp {}  ac {}",
                            monster.challenge_rating, monster.hit_points, monster.armor_class
                        ),
                        theme::muted(),
                    ),
                ]));
                if i == self.selected && !monster.description.is_empty() {
                    lines.push(Line::styled(
                        format!("    {}", monster.description),
                        theme::muted(),
                    ));
                }
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "[n]:new  [/]:search  [f]:CR filter  [x]:clear filters  [r]:refresh",
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(lines), chunks[2]);

        if let Some(form) = &self.form {
            let mut form_lines = vec![
                form.name.render_line(form.field == 0),
                form.challenge_rating.render_line(form.field == 1),
                form.hit_points.render_line(form.field == 2),
                form.armor_class.render_line(form.field == 3),
                form.description.render_line(form.field == 4),
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
                Paragraph::new(form_lines).block(theme::block_focused("New Monster")),
                chunks[3],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn named_form(cr: &str) -> MonsterForm {
        let mut form = MonsterForm::new();
        form.name.set_value("Goblin");
        form.challenge_rating.set_value(cr);
        form
    }

    #[rstest]
    #[case("0")]
    #[case("0.125")]
    #[case("0.25")]
    #[case("3")]
    #[case("22.5")]
    fn test_quantized_cr_accepted(#[case] cr: &str) {
        assert!(named_form(cr).validate().is_ok());
    }

    #[rstest]
    #[case("-1")]
    #[case("0.3")]
    #[case("1.001")]
    #[case("CR5")]
    fn test_invalid_cr_rejected(#[case] cr: &str) {
        assert!(named_form(cr).validate().is_err());
    }
}

//! Dice roller page.
//!
//! Notation interpretation is the service's job: the page only picks a
//! die and a count, and renders the history the dice store keeps.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::api::dice::Die;
use crate::core::store::{RollRecord, Stores};
use crate::tui::services::Services;
use crate::tui::theme;

/// The service rejects batches outside this range.
const NUM_MIN: u32 = 1;
const NUM_MAX: u32 = 100;

/// Quick-select key mappings: (key, die).
const QUICK_SELECT: &[(char, Die)] = &[
    ('4', Die::D4),
    ('6', Die::D6),
    ('8', Die::D8),
    ('0', Die::D10),
    ('2', Die::D12),
    ('d', Die::D20),
];

/// Page controller for the dice roller.
pub struct DiceView {
    die_index: usize,
    num: u32,
}

impl DiceView {
    pub fn new() -> Self {
        // d20 is the default die, as any table would expect.
        let die_index = Die::ALL
            .iter()
            .position(|&d| d == Die::D20)
            .unwrap_or(0);
        Self { die_index, num: 1 }
    }

    fn die(&self) -> Die {
        Die::ALL[self.die_index]
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

        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.die_index = (self.die_index + Die::ALL.len() - 1) % Die::ALL.len();
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.die_index = (self.die_index + 1) % Die::ALL.len();
                true
            }
            KeyCode::Up | KeyCode::Char('+') => {
                self.num = (self.num + 1).min(NUM_MAX);
                true
            }
            KeyCode::Down | KeyCode::Char('-') => {
                self.num = self.num.saturating_sub(1).max(NUM_MIN);
                true
            }
            KeyCode::Enter => {
                // One roll at a time; the button stays "disabled" while
                // a request is in flight.
                if !stores.dice.status().is_loading() {
                    services.roll_dice(&mut stores.dice, self.die(), self.num);
                }
                true
            }
            KeyCode::Char('x') => {
                stores.dice.clear();
                true
            }
            KeyCode::Char(c) => {
                if let Some((_, die)) = QUICK_SELECT.iter().find(|(k, _)| k == c) {
                    self.die_index = Die::ALL
                        .iter()
                        .position(|d| d == die)
                        .unwrap_or(self.die_index);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    fn format_roll(record: &RollRecord) -> String {
        let results = record
            .results
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}{}: [{}] = {}",
            record.num,
            record.die.label(),
            results,
            record.total
        )
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, stores: &Stores) {
        let store = &stores.dice;
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::styled("Dice Roller", theme::title())),
            chunks[0],
        );

        // Die picker row
        let mut picker = vec![Span::raw("  ")];
        for (i, die) in Die::ALL.iter().enumerate() {
            let style = if i == self.die_index {
                theme::highlight()
            } else {
                theme::muted()
            };
            picker.push(Span::styled(format!("[{}] ", die.label()), style));
        }
        let rolling = store.status().is_loading();
        let roll_hint = if rolling { "Rolling…" } else { "[Enter]:roll" };
        let picker_lines = vec![
            Line::from(picker),
            Line::from(vec![
                Span::styled(format!("  {} × {}   ", self.num, self.die().label()), theme::heading()),
                Span::styled(
                    format!("[←/→]:die  [↑/↓]:count  {roll_hint}  [x]:clear"),
                    theme::key_hint(),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(picker_lines), chunks[1]);

        // Last roll / error banner
        let mut headline: Vec<Line> = Vec::new();
        if let Some(error) = store.error() {
            headline.push(Line::styled(format!("Error: {error}"), theme::error_banner()));
        } else if let Some(last) = store.last_roll() {
            headline.push(Line::from(vec![
                Span::styled("Last roll  ", theme::muted()),
                Span::styled(Self::format_roll(last), theme::heading()),
            ]));
        }
        frame.render_widget(Paragraph::new(headline), chunks[2]);

        // History, newest first
        let mut lines: Vec<Line> = vec![Line::styled("History", theme::heading())];
        if store.rolls().is_empty() {
            lines.push(Line::styled("  No rolls yet.", theme::muted()));
        }
        for record in store.rolls() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}  ", record.timestamp.format("%H:%M:%S")),
                    theme::dim(),
                ),
                Span::raw(Self::format_roll(record)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), chunks[3]);
    }
}

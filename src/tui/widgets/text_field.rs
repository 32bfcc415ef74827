//! Labeled single-line text input for form panels.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use crate::tui::theme;

/// A form field: label plus an editable line with cursor positioning.
#[derive(Debug, Clone)]
pub struct TextField {
    label: &'static str,
    content: String,
    cursor: usize,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            content: String::new(),
            cursor: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.content = value.into();
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Apply an editing key. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.content.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let prev = self.content[..self.cursor]
                        .char_indices()
                        .next_back()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.content.drain(prev..self.cursor);
                    self.cursor = prev;
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.content.len() {
                    let next = self.content[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.content.len());
                    self.content.drain(self.cursor..next);
                }
                true
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor = self.content[..self.cursor]
                        .char_indices()
                        .next_back()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                true
            }
            KeyCode::Right => {
                if self.cursor < self.content.len() {
                    self.cursor = self.content[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.content.len());
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.content.len();
                true
            }
            _ => false,
        }
    }

    /// Render as a single form line; the focused field shows a cursor.
    pub fn render_line(&self, focused: bool) -> Line<'_> {
        let label_style = if focused {
            theme::highlight()
        } else {
            theme::muted()
        };
        let mut spans = vec![Span::styled(format!("  {:<12}", self.label), label_style)];

        if focused {
            let (before, after) = self.content.split_at(self.cursor);
            spans.push(Span::raw(before));
            spans.push(Span::styled("█", theme::border_focused()));
            spans.push(Span::raw(after));
        } else {
            spans.push(Span::raw(self.content.as_str()));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut field = TextField::new("Name");
        for c in "Mira".chars() {
            field.handle_key(&key(KeyCode::Char(c)));
        }
        assert_eq!(field.value(), "Mira");

        field.handle_key(&key(KeyCode::Backspace));
        assert_eq!(field.value(), "Mir");
    }

    #[test]
    fn test_cursor_editing_mid_string() {
        let mut field = TextField::new("Name");
        field.set_value("Mra");
        field.handle_key(&key(KeyCode::Home));
        field.handle_key(&key(KeyCode::Right));
        field.handle_key(&key(KeyCode::Char('i')));
        assert_eq!(field.value(), "Mira");
    }

    #[test]
    fn test_multibyte_cursor_moves() {
        let mut field = TextField::new("Name");
        field.set_value("Åse");
        field.handle_key(&key(KeyCode::Home));
        field.handle_key(&key(KeyCode::Delete));
        assert_eq!(field.value(), "se");
    }

    #[test]
    fn test_is_empty_ignores_whitespace() {
        let mut field = TextField::new("Name");
        field.set_value("   ");
        assert!(field.is_empty());
    }
}

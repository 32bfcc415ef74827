//! Centralized Ember & Gold color theme for the Campaign Companion TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Ember red — primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0xB7, 0x3E, 0x2E);
/// Soft ember — highlights, hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xD4, 0x5D, 0x45);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Gold — accent, calls to action, selected entries.
pub const ACCENT: Color = Color::Rgb(0xD9, 0xA4, 0x41);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Near-black base background.
pub const BG_BASE: Color = Color::Rgb(0x16, 0x12, 0x0E);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE8, 0xE0, 0xD1);
/// Muted text — secondary labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x8A, 0x82, 0x74);
/// Dim text — disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x54, 0x4E, 0x44);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error — failures, the red banner.
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Success — confirmations, healthy status.
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
/// Warning — degraded status.
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Page title text.
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

/// Focused border style.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unfocused border style.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for disabled/faint items.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// The red error banner.
pub fn error_banner() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}

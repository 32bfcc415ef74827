//! Navigation sidebar: one entry per page, purely structural.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::events::Focus;
use super::theme;

/// Render the page list, marking the focused page.
pub fn render(frame: &mut Frame, area: Rect, focus: Focus) {
    let mut lines = vec![
        Line::styled(" Campaign", theme::heading()),
        Line::styled(" Companion", theme::heading()),
        Line::raw(""),
    ];

    for (i, page) in Focus::ALL.iter().enumerate() {
        let marker = if *page == focus { "▸ " } else { "  " };
        let style = if *page == focus {
            theme::highlight()
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{} {}", i + 1, page.label()), style),
        ]));
    }

    let block = theme::block_default("Pages");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

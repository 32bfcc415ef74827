//! Root layout computation for sidebar + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the navigation sidebar.
pub const SIDEBAR_WIDTH: u16 = 18;
/// Hide the sidebar entirely below this terminal width.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 48;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Sidebar area (None when the terminal is too narrow).
    pub sidebar: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Content (sidebar + main)
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        let (sidebar, main) = if area.width < HIDE_SIDEBAR_THRESHOLD {
            (None, content_area)
        } else {
            let cols = Layout::horizontal([
                Constraint::Length(SIDEBAR_WIDTH),
                Constraint::Min(1),
            ])
            .split(content_area);
            (Some(cols[0]), cols[1])
        };

        AppLayout {
            sidebar,
            main,
            status,
        }
    }
}

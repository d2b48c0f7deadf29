// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Main Panel (fill): Compare or Rankings tab        |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The Compare tab further splits its panel with `compare_layout`.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: tab bar and dataset summary.
    pub status_bar: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | main(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(5),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

/// Areas inside the Compare tab.
#[derive(Debug, Clone)]
pub struct CompareLayout {
    pub side_a: Rect,
    pub side_b: Rect,
    /// Prediction banner below both rosters.
    pub result: Rect,
}

/// Split the main panel into two side-by-side rosters over a result banner.
pub fn compare_layout(area: Rect) -> CompareLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vertical[0]);

    CompareLayout {
        side_a: sides[0],
        side_b: sides[1],
        result: vertical[1],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

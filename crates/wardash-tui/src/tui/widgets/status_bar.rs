// Status bar widget: tab indicator and dataset summary.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{TabId, ViewState};

/// Render the status bar into the given area.
///
/// Layout: [tab bar] | [player and team counts]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(tab_spans(state.active_tab));

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        dataset_summary(state),
        Style::default().fg(Color::White),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "47 players / 8 teams"
pub fn dataset_summary(state: &ViewState) -> String {
    format!(
        "{} players / {} teams",
        state.dataset.len(),
        state.teams.len()
    )
}

/// Build tab indicator spans with the active tab highlighted.
/// E.g. "[1:Compare] [2:Rankings]"
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let tabs = [(TabId::Compare, "1:Compare"), (TabId::Rankings, "2:Rankings")];

    let mut spans = Vec::new();
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

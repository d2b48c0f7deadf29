// Compare tab: two roster panels side by side over a prediction banner.
//
// Each panel lists the team's hitters with an exclusion checkbox, then the
// selected pitcher and the running totals. The banner shows the predicted
// winner only after the user asks for it (Enter).

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use wardash_core::dataset::PlayerRecord;
use wardash_core::query::{
    format_rating, roster_total, selected_pitcher_rating, team_hitter_sum, Winner, NO_PITCHER,
};

use crate::tui::layout::compare_layout;
use crate::tui::{Side, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let layout = compare_layout(area);
    render_side(frame, layout.side_a, state, Side::A);
    render_side(frame, layout.side_b, state, Side::B);
    render_result(frame, layout.result, state);
}

fn render_side(frame: &mut Frame, area: Rect, state: &ViewState, side: Side) {
    let focused = state.focused_side == side;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {}: {} ", side.label(), state.team(side)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [list_area, summary_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);

    let hitters = state.hitter_records(side);

    if hitters.is_empty() {
        frame.render_widget(
            Paragraph::new("  No hitters.").style(Style::default().fg(Color::DarkGray)),
            list_area,
        );
    } else {
        render_hitters(frame, list_area, state, side, &hitters, focused);
    }

    frame.render_widget(Paragraph::new(summary_lines(state, side)), summary_area);
}

fn render_hitters(
    frame: &mut Frame,
    area: Rect,
    state: &ViewState,
    side: Side,
    hitters: &[&PlayerRecord],
    focused: bool,
) {
    let side_state = state.side(side);
    let visible_rows = (area.height as usize).max(1);
    // Keep the cursor on screen.
    let offset = side_state.cursor.saturating_sub(visible_rows - 1);

    let items: Vec<ListItem> = hitters
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, record)| {
            let excluded = side_state.excluded.contains(&record.name);
            let mut style = if excluded {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };
            if focused && i == side_state.cursor {
                style = style.bg(Color::DarkGray).fg(Color::Yellow);
            }
            ListItem::new(Line::from(Span::styled(hitter_line(record, excluded), style)))
        })
        .collect();

    frame.render_widget(List::new(items), area);

    if hitters.len() > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(hitters.len() - visible_rows).position(offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

/// "[x] Judge  8.1" for an excluded hitter, "[ ] ..." otherwise.
pub fn hitter_line(record: &PlayerRecord, excluded: bool) -> String {
    let mark = if excluded { "x" } else { " " };
    format!(
        " [{}] {:<24} {:>5}",
        mark,
        record.name,
        format_rating(record.rating)
    )
}

fn summary_lines(state: &ViewState, side: Side) -> Vec<Line<'static>> {
    let team = state.team(side);
    let excluded = &state.side(side).excluded;
    let hitter_sum = team_hitter_sum(&state.dataset, team, excluded);

    let selection = state.selection(side);
    let pitcher = match &selection.pitcher {
        Some(name) => format!(
            "{} ({})",
            name,
            format_rating(selected_pitcher_rating(&state.dataset, &selection))
        ),
        None => NO_PITCHER.to_string(),
    };

    let total = roster_total(&state.dataset, &selection);

    vec![
        Line::from(vec![
            Span::styled(" Pitcher: ", Style::default().fg(Color::Gray)),
            Span::raw(pitcher),
        ]),
        Line::from(vec![
            Span::styled(" Hitters: ", Style::default().fg(Color::Gray)),
            Span::raw(format!(
                "{} ({} excluded)",
                format_rating(hitter_sum),
                excluded.len()
            )),
        ]),
        Line::from(vec![
            Span::styled(" Total WAR: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_rating(total),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ]
}

fn render_result(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title(" Prediction ");

    let line = if state.show_prediction {
        let report = state.matchup();
        let color = match report.matchup.winner {
            Winner::Tie => Color::Blue,
            _ => Color::Green,
        };
        Line::from(Span::styled(
            format!(" {}", report),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            " Press Enter to predict the winner.",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

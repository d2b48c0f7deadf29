// Rankings tab: top-N teams by summed WAR, or top-N individual players.
//
// Title carries the active filter and row count; rows scroll with the
// "rankings" offset in ViewState.

use ratatui::layout::{Constraint, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;

use wardash_core::query::{rank_players, rank_teams, PositionFilter};

use crate::tui::{RankingKind, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let filter = state.rankings.filter;
    let limit = state.current_limit();

    let (header, rows, widths): (Row, Vec<Row>, Vec<Constraint>) = match state.rankings.kind {
        RankingKind::Teams => {
            let ranked = rank_teams(&state.dataset, filter, limit);
            let rows = ranked
                .iter()
                .map(|r| {
                    Row::new(vec![
                        Cell::from(r.rank.to_string()),
                        Cell::from(r.team.clone()),
                        Cell::from(r.rating_display()),
                    ])
                })
                .collect();
            (
                header_row(&["#", "Team", total_header(filter)]),
                rows,
                vec![
                    Constraint::Length(4),
                    Constraint::Min(12),
                    Constraint::Length(18),
                ],
            )
        }
        RankingKind::Players => {
            let ranked = rank_players(&state.dataset, filter, limit);
            let rows = ranked
                .iter()
                .map(|r| {
                    Row::new(vec![
                        Cell::from(r.rank.to_string()),
                        Cell::from(r.name.clone()),
                        Cell::from(r.team.clone()),
                        Cell::from(r.position.code()),
                        Cell::from(r.rating_display()),
                    ])
                })
                .collect();
            (
                header_row(&["#", "Player", "Team", "Pos", "WAR"]),
                rows,
                vec![
                    Constraint::Length(4),
                    Constraint::Min(20),
                    Constraint::Length(8),
                    Constraint::Length(4),
                    Constraint::Length(6),
                ],
            )
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(build_title(state.rankings.kind, filter, rows.len()));

    if rows.is_empty() {
        let paragraph = Paragraph::new("  No players match this filter.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // Visible rows: subtract borders and header
    let visible_rows = (area.height as usize).saturating_sub(3).max(1);
    let total = rows.len();
    let max_offset = total.saturating_sub(visible_rows);
    let scroll_offset = state
        .scroll_offset
        .get("rankings")
        .copied()
        .unwrap_or(0)
        .min(max_offset);

    let visible: Vec<Row> = rows.into_iter().skip(scroll_offset).collect();
    let table = Table::new(visible, widths).header(header).block(block);
    frame.render_widget(table, area);

    if total > visible_rows {
        let mut scrollbar_state = ScrollbarState::new(max_offset).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn header_row<'a>(labels: &[&'a str]) -> Row<'a> {
    Row::new(labels.iter().map(|l| Cell::from(*l)).collect::<Vec<_>>()).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
}

/// Column header for the summed team rating under `filter`.
pub fn total_header(filter: PositionFilter) -> &'static str {
    match filter {
        PositionFilter::All => "Total WAR",
        PositionFilter::Hitter => "Total Hitter WAR",
        PositionFilter::Pitcher => "Total Pitcher WAR",
    }
}

/// E.g. "Top 10 Teams by WAR (Position: H)"
pub fn build_title(kind: RankingKind, filter: PositionFilter, shown: usize) -> String {
    let noun = match kind {
        RankingKind::Teams => "Teams",
        RankingKind::Players => "Players",
    };
    format!(" Top {} {} by WAR (Position: {}) ", shown, noun, filter.label())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

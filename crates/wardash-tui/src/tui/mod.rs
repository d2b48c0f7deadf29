// TUI dashboard: session state, layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding this session's selections (teams,
// exclusions, pitcher choice, ranking filter and limits) plus the shared,
// read-only dataset handle. Every frame re-runs the query engine against the
// current selections; nothing computed is cached between frames.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{debug, info};

use wardash_core::config::RankingsConfig;
use wardash_core::dataset::{Dataset, PlayerRecord};
use wardash_core::query::{
    compare_rosters, hitter_names, hitter_records, pitcher_names, rank_players, rank_teams,
    MatchupReport, PositionFilter, RosterSelection,
};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Which tab is shown in the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    Compare,
    Rankings,
}

/// One side of the team comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::A => "Team 1",
            Side::B => "Team 2",
        }
    }
}

/// Which ranking the Rankings tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingKind {
    Teams,
    Players,
}

/// Commands the input handler hands back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Selections for one side of the comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideState {
    /// Index into `ViewState::teams`.
    pub team_index: usize,
    /// Hitters left out of the sum.
    pub excluded: BTreeSet<String>,
    /// Index into the team's pitcher list; `None` is "Other".
    pub pitcher_index: Option<usize>,
    /// Highlighted row in the hitter list.
    pub cursor: usize,
}

/// Ranking view settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingsState {
    pub kind: RankingKind,
    pub filter: PositionFilter,
    pub team_limit: usize,
    pub player_limit: usize,
}

/// TUI-local session state.
pub struct ViewState {
    /// Shared ratings table.
    pub dataset: Arc<Dataset>,
    /// Sorted team identifiers offered for selection.
    pub teams: Vec<String>,
    /// Configured ranking bounds.
    pub limits: RankingsConfig,
    pub active_tab: TabId,
    pub focused_side: Side,
    pub sides: [SideState; 2],
    /// Whether the matchup prediction is revealed.
    pub show_prediction: bool,
    pub rankings: RankingsState,
    /// Per-widget scroll offsets (keyed by widget name).
    pub scroll_offset: HashMap<String, usize>,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl ViewState {
    pub fn new(dataset: Arc<Dataset>, limits: &RankingsConfig) -> Self {
        let teams = wardash_core::query::team_names(&dataset);
        let second = if teams.len() > 1 { 1 } else { 0 };
        let mut state = ViewState {
            dataset,
            teams,
            limits: limits.clone(),
            active_tab: TabId::Compare,
            focused_side: Side::A,
            sides: [
                SideState::default(),
                SideState {
                    team_index: second,
                    ..SideState::default()
                },
            ],
            show_prediction: false,
            rankings: RankingsState {
                kind: RankingKind::Teams,
                filter: PositionFilter::All,
                team_limit: limits.default_limit.min(limits.max_team_limit),
                player_limit: limits.default_limit.min(limits.max_player_limit),
            },
            scroll_offset: HashMap::new(),
            confirm_quit: false,
        };
        for side in [Side::A, Side::B] {
            state.sides[side.index()].pitcher_index = state.first_pitcher(side);
        }
        state
    }

    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    /// Team currently selected on `side` (empty if the table has no teams).
    pub fn team(&self, side: Side) -> &str {
        self.teams
            .get(self.side(side).team_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn hitters(&self, side: Side) -> Vec<&str> {
        hitter_names(&self.dataset, self.team(side))
    }

    /// Hitter records on `side`, in the same order as [`ViewState::hitters`].
    pub fn hitter_records(&self, side: Side) -> Vec<&PlayerRecord> {
        hitter_records(&self.dataset, self.team(side))
    }

    pub fn pitchers(&self, side: Side) -> Vec<&str> {
        pitcher_names(&self.dataset, self.team(side))
    }

    /// Index of the team's first listed pitcher; `None` when it has none.
    fn first_pitcher(&self, side: Side) -> Option<usize> {
        (!self.pitchers(side).is_empty()).then_some(0)
    }

    /// Selected pitcher name on `side`, if any.
    pub fn pitcher(&self, side: Side) -> Option<&str> {
        let index = self.side(side).pitcher_index?;
        self.pitchers(side).get(index).copied()
    }

    /// The query-engine view of one side's selections.
    pub fn selection(&self, side: Side) -> RosterSelection {
        RosterSelection {
            team: self.team(side).to_string(),
            excluded: self.side(side).excluded.clone(),
            pitcher: self.pitcher(side).map(str::to_string),
        }
    }

    /// Totals and prediction for the current selections.
    pub fn matchup(&self) -> MatchupReport {
        compare_rosters(
            &self.dataset,
            &self.selection(Side::A),
            &self.selection(Side::B),
        )
    }

    // -- Compare tab mutations ---------------------------------------------

    /// Step the focused side's team forwards or backwards, wrapping. A new
    /// team starts with no exclusions and its first listed pitcher.
    pub fn cycle_team(&mut self, forward: bool) {
        let count = self.teams.len();
        if count == 0 {
            return;
        }
        let side = &mut self.sides[self.focused_side.index()];
        side.team_index = if forward {
            (side.team_index + 1) % count
        } else {
            (side.team_index + count - 1) % count
        };
        side.excluded.clear();
        side.cursor = 0;
        let pitcher_index = self.first_pitcher(self.focused_side);
        self.sides[self.focused_side.index()].pitcher_index = pitcher_index;
        self.show_prediction = false;
        debug!(
            "{} set to {}",
            self.focused_side.label(),
            self.team(self.focused_side)
        );
    }

    /// Move the hitter cursor on the focused side, clamped to the list.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.hitters(self.focused_side).len();
        let side = &mut self.sides[self.focused_side.index()];
        if len == 0 {
            side.cursor = 0;
            return;
        }
        let next = side.cursor.saturating_add_signed(delta);
        side.cursor = next.min(len - 1);
    }

    /// Toggle exclusion of the hitter under the cursor.
    pub fn toggle_exclusion(&mut self) {
        let focused = self.focused_side;
        let Some(name) = self
            .hitters(focused)
            .get(self.side(focused).cursor)
            .map(|n| n.to_string())
        else {
            return;
        };
        let side = &mut self.sides[focused.index()];
        if !side.excluded.remove(&name) {
            side.excluded.insert(name);
        }
        self.show_prediction = false;
    }

    pub fn clear_exclusions(&mut self) {
        self.sides[self.focused_side.index()].excluded.clear();
        self.show_prediction = false;
    }

    /// Cycle the focused side's pitcher through each listed pitcher, then
    /// "Other", then back to the first.
    pub fn cycle_pitcher(&mut self) {
        let count = self.pitchers(self.focused_side).len();
        let side = &mut self.sides[self.focused_side.index()];
        side.pitcher_index = match side.pitcher_index {
            None if count > 0 => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            _ => None,
        };
        self.show_prediction = false;
    }

    pub fn switch_side(&mut self) {
        self.focused_side = self.focused_side.other();
    }

    // -- Rankings tab mutations --------------------------------------------

    /// Row count requested for the active ranking kind.
    pub fn current_limit(&self) -> usize {
        match self.rankings.kind {
            RankingKind::Teams => self.rankings.team_limit,
            RankingKind::Players => self.rankings.player_limit,
        }
    }

    /// Rows the active ranking produces at the current filter and limit.
    pub fn ranking_rows(&self) -> usize {
        let limit = self.current_limit();
        match self.rankings.kind {
            RankingKind::Teams => rank_teams(&self.dataset, self.rankings.filter, limit).len(),
            RankingKind::Players => {
                rank_players(&self.dataset, self.rankings.filter, limit).len()
            }
        }
    }

    /// Adjust the active ranking's row count within `[1, configured max]`.
    /// The scroll position starts over at the top.
    pub fn adjust_limit(&mut self, delta: isize) {
        let (limit, max) = match self.rankings.kind {
            RankingKind::Teams => (&mut self.rankings.team_limit, self.limits.max_team_limit),
            RankingKind::Players => (
                &mut self.rankings.player_limit,
                self.limits.max_player_limit,
            ),
        };
        *limit = limit.saturating_add_signed(delta).clamp(1, max.max(1));
        self.scroll_offset.remove("rankings");
    }

    pub fn toggle_ranking_kind(&mut self) {
        self.rankings.kind = match self.rankings.kind {
            RankingKind::Teams => RankingKind::Players,
            RankingKind::Players => RankingKind::Teams,
        };
        self.scroll_offset.remove("rankings");
    }

    pub fn cycle_filter(&mut self) {
        self.rankings.filter = self.rankings.filter.next();
        self.scroll_offset.remove("rankings");
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.active_tab {
        TabId::Compare => widgets::compare::render(frame, layout.main_panel, state),
        TabId::Rankings => widgets::rankings::render(frame, layout.main_panel, state),
    }
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

/// Key hints for the active tab.
pub fn help_text(tab: TabId) -> &'static str {
    match tab {
        TabId::Compare => {
            " q:Quit | 1-2:Tabs | Tab:Side | t/T:Team | Space:Exclude | c:Clear | p:Pitcher | Enter:Predict"
        }
        TabId::Rankings => " q:Quit | 1-2:Tabs | m:Teams/Players | f:Filter | +/-:Count | j/k:Scroll",
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state.active_tab),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(mut view_state: ViewState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!(
        "Dashboard opened with {} teams",
        view_state.teams.len()
    );

    let result = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(UserCommand::Quit) = input::handle_key(key_event, &mut view_state) {
                            break Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    info!("Dashboard closed");

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Keyboard input handling.
//
// Translates crossterm key events into ViewState mutations (tab switching,
// team and exclusion selection, ranking filters, scrolling) or into a
// UserCommand for the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{TabId, UserCommand, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the event loop must act (quit). Returns
/// `None` when the key press was handled locally by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Quit confirmation mode: only y/q confirm, n/Esc cancel, everything else blocked
    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('1') => {
            view_state.active_tab = TabId::Compare;
            None
        }
        KeyCode::Char('2') => {
            view_state.active_tab = TabId::Rankings;
            None
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => match view_state.active_tab {
            TabId::Compare => handle_compare_key(key_event, view_state),
            TabId::Rankings => handle_rankings_key(key_event, view_state),
        },
    }
}

/// Handle key events while in quit confirmation mode.
///
/// - `y` or `q` confirms quit
/// - `n` or `Esc` cancels (returns to normal mode)
/// - All other keys are blocked
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn handle_compare_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            view_state.switch_side();
        }
        KeyCode::Char('t') => view_state.cycle_team(true),
        KeyCode::Char('T') => view_state.cycle_team(false),
        KeyCode::Up | KeyCode::Char('k') => view_state.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => view_state.move_cursor(1),
        KeyCode::Char(' ') => view_state.toggle_exclusion(),
        KeyCode::Char('c') => view_state.clear_exclusions(),
        KeyCode::Char('p') => view_state.cycle_pitcher(),
        KeyCode::Enter => view_state.show_prediction = true,
        _ => {}
    }
    None
}

fn handle_rankings_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('m') => view_state.toggle_ranking_kind(),
        KeyCode::Char('f') => view_state.cycle_filter(),
        KeyCode::Char('+') | KeyCode::Char('=') => view_state.adjust_limit(1),
        KeyCode::Char('-') => view_state.adjust_limit(-1),
        KeyCode::Up | KeyCode::Char('k') => scroll_up(view_state, 1),
        KeyCode::Down | KeyCode::Char('j') => scroll_down(view_state, 1),
        KeyCode::PageUp => scroll_up(view_state, page_size()),
        KeyCode::PageDown => scroll_down(view_state, page_size()),
        _ => {}
    }
    None
}

/// Scroll the rankings table up by the given number of lines.
fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let offset = view_state
        .scroll_offset
        .entry("rankings".to_string())
        .or_insert(0);
    *offset = offset.saturating_sub(lines);
}

/// Scroll the rankings table down, never past the last ranked row.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let max = view_state.ranking_rows().saturating_sub(1);
    let offset = view_state
        .scroll_offset
        .entry("rankings".to_string())
        .or_insert(0);
    *offset = offset.saturating_add(lines).min(max);
}

/// Page size for PageUp/PageDown scrolling.
fn page_size() -> usize {
    10
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

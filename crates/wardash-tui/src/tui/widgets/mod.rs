// TUI widget modules for each dashboard panel.

pub mod compare;
pub mod quit_confirm;
pub mod rankings;
pub mod status_bar;

/// Flatten a rendered test buffer into one string for substring checks.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

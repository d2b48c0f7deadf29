// wardash binary crate: CLI arguments, one-shot reports, and the TUI dashboard.

pub mod cli;
pub mod report;
pub mod tui;

// Library root: dataset loading, query engine, and configuration for the
// WAR dashboard. The terminal shell in `wardash-tui` consumes this API.

pub mod config;
pub mod dataset;
pub mod query;

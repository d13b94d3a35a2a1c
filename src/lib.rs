#[macro_use]
pub mod diagnostics;

pub mod championship;
pub mod config;
pub mod loader;
pub mod output;
pub mod standings;
pub mod tui;

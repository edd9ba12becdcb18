// Interactive formula dashboard: app state, command protocol, export and TUI.

pub mod app;
pub mod export;
pub mod protocol;
pub mod tui;

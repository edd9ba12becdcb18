// TUI widget modules for each dashboard panel.

pub mod leaderboard;
pub mod outliers;
pub mod sliders;
pub mod status_bar;
pub mod teams;

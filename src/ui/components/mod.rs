pub mod dashboard;
pub mod leaderboard;
pub mod menu;
pub mod quiz_area;
pub mod time_bar;

pub mod players_handler;
pub mod problem;
pub mod sessions_handler;

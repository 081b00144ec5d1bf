pub mod dto;
pub mod player_service;
pub mod retention_service;
pub mod session_service;

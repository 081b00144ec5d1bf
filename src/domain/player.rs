use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One team ("grup") participating in one game session ("partida").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub session_number: i64,
    pub team_name: String,
    pub keys_collected: i64,
    pub is_winner: bool,
    pub session_date: NaiveDate,
    pub last_connection: NaiveDateTime,
    pub last_position_x: f64,
    pub last_position_y: f64,
}

/// Candidate row for registration; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub session_number: i64,
    pub team_name: String,
    pub keys_collected: i64,
    pub is_winner: bool,
    pub session_date: NaiveDate,
    pub last_connection: NaiveDateTime,
    pub last_position_x: f64,
    pub last_position_y: f64,
}

impl NewPlayer {
    pub fn into_player(self, id: i64) -> Player {
        Player {
            id,
            session_number: self.session_number,
            team_name: self.team_name,
            keys_collected: self.keys_collected,
            is_winner: self.is_winner,
            session_date: self.session_date,
            last_connection: self.last_connection,
            last_position_x: self.last_position_x,
            last_position_y: self.last_position_y,
        }
    }
}

/// Sparse update: only populated slots reach the store.
#[derive(Debug, Clone, Default)]
pub struct PlayerPatch {
    pub keys_collected: Option<i64>,
    pub is_winner: Option<bool>,
    pub last_connection: Option<NaiveDateTime>,
    pub last_position_x: Option<f64>,
    pub last_position_y: Option<f64>,
}

impl PlayerPatch {
    pub fn is_empty(&self) -> bool {
        self.keys_collected.is_none()
            && self.is_winner.is_none()
            && self.last_connection.is_none()
            && self.last_position_x.is_none()
            && self.last_position_y.is_none()
    }
}

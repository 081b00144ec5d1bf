use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::DomainError,
    player::{NewPlayer, Player, PlayerPatch},
};

pub const MISSING_TEAM_NAME: &str = "Falta el camp 'nomGrup'";
pub const NO_FIELDS_TO_UPDATE: &str = "No hi ha cap camp per actualitzar";
pub const BAD_CUTOFF_DATE: &str = "El camp 'data' ha de tenir format YYYY-MM-DD";

/// Registration body; wire names are the Catalan fields the game clients send.
#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    #[serde(rename = "numeroPartida", default)]
    pub session_number: i64,
    #[serde(rename = "nomGrup", default)]
    pub team_name: Option<String>,
    #[serde(rename = "numeroClaus", default)]
    pub keys_collected: i64,
    #[serde(rename = "guanyador", default, deserialize_with = "deserialize_flag")]
    pub is_winner: bool,
    #[serde(rename = "dataPartida", default)]
    pub session_date: Option<NaiveDate>,
    #[serde(rename = "darreraConnexio", default)]
    pub last_connection: Option<NaiveDateTime>,
    #[serde(rename = "darreraPosicioX", default)]
    pub last_position_x: f64,
    #[serde(rename = "darreraPosicioY", default)]
    pub last_position_y: f64,
}

impl RegisterPlayerRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        let Some(team_name) = self.team_name.as_deref() else {
            return Err(DomainError::validation(MISSING_TEAM_NAME));
        };

        let team_name = team_name.trim();
        if team_name.is_empty() {
            return Err(DomainError::validation(MISSING_TEAM_NAME));
        }
        if team_name.len() > 100 {
            return Err(DomainError::validation(
                "El camp 'nomGrup' és massa llarg (màxim 100 caràcters)",
            ));
        }

        Ok(())
    }

    /// Fills the creation-time defaults: today's UTC date and the current
    /// instant when the caller omits them.
    pub fn into_new_player(self) -> NewPlayer {
        let now = Utc::now();
        NewPlayer {
            session_number: self.session_number,
            team_name: self
                .team_name
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            keys_collected: self.keys_collected,
            is_winner: self.is_winner,
            session_date: self.session_date.unwrap_or_else(|| now.date_naive()),
            last_connection: self.last_connection.unwrap_or_else(|| now.naive_utc()),
            last_position_x: self.last_position_x,
            last_position_y: self.last_position_y,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerRegistered {
    pub message: &'static str,
    #[serde(rename = "idGrup")]
    pub id: i64,
    #[serde(rename = "numeroPartida")]
    pub session_number: i64,
    #[serde(rename = "nomGrup")]
    pub team_name: String,
}

impl From<Player> for PlayerRegistered {
    fn from(value: Player) -> Self {
        Self {
            message: "Jugador afegit correctament!",
            id: value.id,
            session_number: value.session_number,
            team_name: value.team_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
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

impl From<Player> for PlayerResponse {
    fn from(value: Player) -> Self {
        Self {
            id: value.id,
            session_number: value.session_number,
            team_name: value.team_name,
            keys_collected: value.keys_collected,
            is_winner: value.is_winner,
            session_date: value.session_date,
            last_connection: value.last_connection,
            last_position_x: value.last_position_x,
            last_position_y: value.last_position_y,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlayerRequest {
    #[serde(rename = "numeroClaus", default)]
    pub keys_collected: Option<i64>,
    #[serde(
        rename = "guanyador",
        default,
        deserialize_with = "deserialize_optional_flag"
    )]
    pub is_winner: Option<bool>,
    #[serde(rename = "darreraConnexio", default)]
    pub last_connection: Option<NaiveDateTime>,
    #[serde(rename = "darreraPosicioX", default)]
    pub last_position_x: Option<f64>,
    #[serde(rename = "darreraPosicioY", default)]
    pub last_position_y: Option<f64>,
}

impl UpdatePlayerRequest {
    pub fn into_patch(self) -> PlayerPatch {
        PlayerPatch {
            keys_collected: self.keys_collected,
            is_winner: self.is_winner,
            last_connection: self.last_connection,
            last_position_x: self.last_position_x,
            last_position_y: self.last_position_y,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct PurgeRequest {
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub message: &'static str,
    #[serde(rename = "dataLimit")]
    pub cutoff: NaiveDate,
    #[serde(rename = "eliminats")]
    pub removed: u64,
}

#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    #[serde(rename = "codiPartida")]
    pub session_id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Game clients send `guanyador` as a tinyint flag; accept both a JSON bool
/// and a 0/1 integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireFlag {
    Bool(bool),
    Number(i64),
}

impl WireFlag {
    fn as_bool(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0,
        }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(WireFlag::deserialize(deserializer)?.as_bool())
}

fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<WireFlag>::deserialize(deserializer)?.map(|flag| flag.as_bool()))
}

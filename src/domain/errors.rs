use thiserror::Error;

pub const DUPLICATE_TEAM_MESSAGE: &str =
    "Ja existeix un jugador amb aquest nom en aquesta partida.";

pub const COUNTER_MISSING_MESSAGE: &str = "No s'ha trobat cap registre a codiPartida";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("conflict: {detail}")]
    Conflict {
        detail: String,
        /// Id of the row that already holds the contested value, when known.
        existing_id: Option<i64>,
    },
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>, existing_id: Option<i64>) -> Self {
        Self::Conflict {
            detail: message.into(),
            existing_id,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    errors::DomainError,
    player::{NewPlayer, Player, PlayerPatch},
};

pub mod in_memory_player_repository;
pub mod in_memory_session_repository;
pub mod mysql_player_repository;
pub mod mysql_session_repository;

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn insert(&self, player: NewPlayer) -> Result<Player, DomainError>;
    async fn find_by_session_and_name(
        &self,
        session_number: i64,
        team_name: &str,
    ) -> Result<Option<Player>, DomainError>;
    /// Applies the populated patch slots to one row; `false` when no row has the id.
    async fn update(&self, id: i64, patch: PlayerPatch) -> Result<bool, DomainError>;
    async fn list_all(&self) -> Result<Vec<Player>, DomainError>;
    /// Removes rows whose session date precedes the cutoff; returns how many went.
    async fn delete_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait SessionCounterRepository: Send + Sync {
    /// Bumps the singleton counter by one and returns the new value.
    ///
    /// Concurrent callers must each observe a distinct value, so
    /// implementations serialize access to the counter record.
    async fn increment_and_get(&self) -> Result<i64, DomainError>;
}

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{DUPLICATE_TEAM_MESSAGE, DomainError},
        player::{NewPlayer, Player, PlayerPatch},
    },
    infrastructure::PlayerRepository,
};

/// Store-free stand-in for the MySQL repository, used by the contract tests.
/// Enforces the same per-session name uniqueness the UNIQUE KEY provides.
#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: RwLock<BTreeMap<i64, Player>>,
    next_id: AtomicI64,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn insert(&self, player: NewPlayer) -> Result<Player, DomainError> {
        let mut players = self.players.write().await;

        if let Some(existing) = players.values().find(|candidate| {
            candidate.session_number == player.session_number
                && candidate.team_name == player.team_name
        }) {
            return Err(DomainError::conflict(
                DUPLICATE_TEAM_MESSAGE,
                Some(existing.id),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let created = player.into_player(id);
        players.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_session_and_name(
        &self,
        session_number: i64,
        team_name: &str,
    ) -> Result<Option<Player>, DomainError> {
        Ok(self
            .players
            .read()
            .await
            .values()
            .find(|candidate| {
                candidate.session_number == session_number && candidate.team_name == team_name
            })
            .cloned())
    }

    async fn update(&self, id: i64, patch: PlayerPatch) -> Result<bool, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::validation(
                "at least one field must be provided for update",
            ));
        }

        let mut players = self.players.write().await;
        let Some(player) = players.get_mut(&id) else {
            return Ok(false);
        };

        if let Some(keys_collected) = patch.keys_collected {
            player.keys_collected = keys_collected;
        }
        if let Some(is_winner) = patch.is_winner {
            player.is_winner = is_winner;
        }
        if let Some(last_connection) = patch.last_connection {
            player.last_connection = last_connection;
        }
        if let Some(last_position_x) = patch.last_position_x {
            player.last_position_x = last_position_x;
        }
        if let Some(last_position_y) = patch.last_position_y {
            player.last_position_y = last_position_y;
        }

        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<Player>, DomainError> {
        Ok(self.players.read().await.values().cloned().collect())
    }

    async fn delete_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError> {
        let mut players = self.players.write().await;
        let before = players.len();
        players.retain(|_, player| player.session_date >= cutoff);
        Ok((before - players.len()) as u64)
    }
}

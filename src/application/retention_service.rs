use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::{
    application::dto::PurgeResponse, domain::errors::DomainError,
    infrastructure::PlayerRepository,
};

/// Bulk-deletes player rows from sessions older than a cutoff date.
#[derive(Clone)]
pub struct RetentionService {
    repository: Arc<dyn PlayerRepository>,
}

impl RetentionService {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    /// Removes every player whose session date is strictly before the cutoff.
    /// Without an explicit cutoff, today's UTC calendar date is used.
    pub async fn purge_older_than(
        &self,
        cutoff: Option<NaiveDate>,
    ) -> Result<PurgeResponse, DomainError> {
        let cutoff = cutoff.unwrap_or_else(|| Utc::now().date_naive());
        let removed = self.repository.delete_older_than(cutoff).await?;

        Ok(PurgeResponse {
            message: "Jugadors antics eliminats correctament.",
            cutoff,
            removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::{
        application::{dto::RegisterPlayerRequest, player_service::PlayerService},
        infrastructure::in_memory_player_repository::InMemoryPlayerRepository,
    };

    fn register_on(session_date: NaiveDate, team_name: &str) -> RegisterPlayerRequest {
        RegisterPlayerRequest {
            session_number: 1,
            team_name: Some(team_name.to_string()),
            keys_collected: 0,
            is_winner: false,
            session_date: Some(session_date),
            last_connection: session_date.and_hms_opt(9, 0, 0),
            last_position_x: 0.0,
            last_position_y: 0.0,
        }
    }

    #[tokio::test]
    async fn purge_is_strictly_before_cutoff() {
        let repository = Arc::new(InMemoryPlayerRepository::new());
        let players = PlayerService::new(repository.clone());
        let retention = RetentionService::new(repository);

        let cutoff = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let before = cutoff.checked_sub_days(Days::new(1)).unwrap();
        let after = cutoff.checked_add_days(Days::new(1)).unwrap();

        players.register(register_on(before, "Old")).await.unwrap();
        players.register(register_on(cutoff, "Boundary")).await.unwrap();
        players.register(register_on(after, "Recent")).await.unwrap();

        let outcome = retention.purge_older_than(Some(cutoff)).await.unwrap();
        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.cutoff, cutoff);

        let remaining = players.list_all().await.unwrap();
        let names: Vec<_> = remaining.iter().map(|p| p.team_name.as_str()).collect();
        assert_eq!(names, vec!["Boundary", "Recent"]);
    }

    #[tokio::test]
    async fn default_cutoff_is_today() {
        let repository = Arc::new(InMemoryPlayerRepository::new());
        let players = PlayerService::new(repository.clone());
        let retention = RetentionService::new(repository);

        let today = Utc::now().date_naive();
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();

        players.register(register_on(yesterday, "Stale")).await.unwrap();
        players.register(register_on(today, "Fresh")).await.unwrap();

        let outcome = retention.purge_older_than(None).await.unwrap();
        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.cutoff, today);

        let remaining = players.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].team_name, "Fresh");
    }
}

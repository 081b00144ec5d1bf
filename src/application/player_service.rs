use std::sync::Arc;

use crate::{
    application::dto::{
        NO_FIELDS_TO_UPDATE, PlayerRegistered, PlayerResponse, RegisterPlayerRequest,
        UpdatePlayerRequest,
    },
    domain::errors::{DUPLICATE_TEAM_MESSAGE, DomainError},
    infrastructure::PlayerRepository,
};

pub const PLAYER_NOT_FOUND: &str = "Jugador no trobat";

#[derive(Clone)]
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(
        &self,
        request: RegisterPlayerRequest,
    ) -> Result<PlayerRegistered, DomainError> {
        request.validate()?;
        let candidate = request.into_new_player();

        if let Some(existing) = self
            .repository
            .find_by_session_and_name(candidate.session_number, &candidate.team_name)
            .await?
        {
            return Err(DomainError::conflict(
                DUPLICATE_TEAM_MESSAGE,
                Some(existing.id),
            ));
        }

        let created = match self.repository.insert(candidate.clone()).await {
            Ok(player) => player,
            // Lost a race against a concurrent registration: the store's
            // uniqueness constraint fired after our pre-check passed. Fetch
            // the winner so the conflict payload still carries its id.
            Err(DomainError::Conflict {
                detail,
                existing_id: None,
            }) => {
                let existing = self
                    .repository
                    .find_by_session_and_name(candidate.session_number, &candidate.team_name)
                    .await?;
                return Err(DomainError::Conflict {
                    detail,
                    existing_id: existing.map(|player| player.id),
                });
            }
            Err(other) => return Err(other),
        };

        Ok(PlayerRegistered::from(created))
    }

    pub async fn update(&self, id: i64, request: UpdatePlayerRequest) -> Result<(), DomainError> {
        let patch = request.into_patch();
        if patch.is_empty() {
            return Err(DomainError::validation(NO_FIELDS_TO_UPDATE));
        }

        let updated = self.repository.update(id, patch).await?;
        if !updated {
            return Err(DomainError::not_found(PLAYER_NOT_FOUND));
        }

        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<PlayerResponse>, DomainError> {
        let players = self.repository.list_all().await?;
        Ok(players.into_iter().map(PlayerResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::infrastructure::in_memory_player_repository::InMemoryPlayerRepository;

    fn service() -> PlayerService {
        PlayerService::new(Arc::new(InMemoryPlayerRepository::new()))
    }

    fn register_request(session_number: i64, team_name: &str) -> RegisterPlayerRequest {
        RegisterPlayerRequest {
            session_number,
            team_name: Some(team_name.to_string()),
            keys_collected: 0,
            is_winner: false,
            session_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            last_connection: NaiveDate::from_ymd_opt(2024, 6, 1)
                .and_then(|date| date.and_hms_opt(10, 0, 0)),
            last_position_x: 0.0,
            last_position_y: 0.0,
        }
    }

    fn empty_update() -> UpdatePlayerRequest {
        UpdatePlayerRequest {
            keys_collected: None,
            is_winner: None,
            last_connection: None,
            last_position_x: None,
            last_position_y: None,
        }
    }

    #[tokio::test]
    async fn distinct_pairs_get_distinct_ids() {
        let service = service();

        let foxes = service.register(register_request(3, "Foxes")).await.unwrap();
        let owls = service.register(register_request(3, "Owls")).await.unwrap();
        let other_session_foxes =
            service.register(register_request(4, "Foxes")).await.unwrap();

        assert_ne!(foxes.id, owls.id);
        assert_ne!(foxes.id, other_session_foxes.id);
        assert_eq!(service.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn duplicate_registration_reports_first_id() {
        let service = service();

        let first = service.register(register_request(3, "Foxes")).await.unwrap();
        let err = service
            .register(register_request(3, "Foxes"))
            .await
            .unwrap_err();

        match err {
            DomainError::Conflict { existing_id, .. } => {
                assert_eq!(existing_id, Some(first.id));
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_team_name_is_rejected() {
        let service = service();

        let mut request = register_request(1, "  ");
        assert!(matches!(
            service.register(request).await,
            Err(DomainError::Validation(_))
        ));

        request = register_request(1, "Foxes");
        request.team_name = None;
        assert!(matches!(
            service.register(request).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_without_fields_is_invalid() {
        let service = service();
        let created = service.register(register_request(3, "Foxes")).await.unwrap();

        assert!(matches!(
            service.update(created.id, empty_update()).await,
            Err(DomainError::Validation(_))
        ));
        // Unknown id would have lost anyway; zero fields is checked first.
        assert!(matches!(
            service.update(9999, empty_update()).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let service = service();
        service.register(register_request(3, "Foxes")).await.unwrap();

        let mut request = empty_update();
        request.keys_collected = Some(5);

        assert!(matches!(
            service.update(9999, request).await,
            Err(DomainError::NotFound(_))
        ));

        let players = service.list_all().await.unwrap();
        assert_eq!(players[0].keys_collected, 0);
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() {
        let service = service();
        let created = service.register(register_request(3, "Foxes")).await.unwrap();

        let mut request = empty_update();
        request.keys_collected = Some(5);
        service.update(created.id, request).await.unwrap();

        let players = service.list_all().await.unwrap();
        let player = &players[0];
        assert_eq!(player.keys_collected, 5);
        assert_eq!(player.session_number, 3);
        assert_eq!(player.team_name, "Foxes");
        assert!(!player.is_winner);
        assert_eq!(player.last_position_x, 0.0);
        assert_eq!(player.last_position_y, 0.0);
    }
}

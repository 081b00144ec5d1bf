use std::sync::Arc;

use crate::application::{
    player_service::PlayerService, retention_service::RetentionService,
    session_service::SessionService,
};

#[derive(Clone)]
pub struct AppState {
    pub player_service: Arc<PlayerService>,
    pub session_service: Arc<SessionService>,
    pub retention_service: Arc<RetentionService>,
}

impl AppState {
    pub fn new(
        player_service: Arc<PlayerService>,
        session_service: Arc<SessionService>,
        retention_service: Arc<RetentionService>,
    ) -> Self {
        Self {
            player_service,
            session_service,
            retention_service,
        }
    }
}

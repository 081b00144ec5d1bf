use std::sync::Arc;

use crate::{domain::errors::DomainError, infrastructure::SessionCounterRepository};

/// Issues the next unique session code from the singleton counter.
#[derive(Clone)]
pub struct SessionService {
    counter: Arc<dyn SessionCounterRepository>,
}

impl SessionService {
    pub fn new(counter: Arc<dyn SessionCounterRepository>) -> Self {
        Self { counter }
    }

    pub async fn next_session_id(&self) -> Result<i64, DomainError> {
        self.counter.increment_and_get().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory_session_repository::InMemorySessionCounterRepository;

    #[tokio::test]
    async fn increments_from_current_value() {
        let service = SessionService::new(Arc::new(InMemorySessionCounterRepository::new(7)));

        assert_eq!(service.next_session_id().await.unwrap(), 8);
        assert_eq!(service.next_session_id().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn missing_counter_row_is_not_found() {
        let service = SessionService::new(Arc::new(InMemorySessionCounterRepository::unseeded()));

        assert!(matches!(
            service.next_session_id().await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_callers_observe_distinct_ids() {
        let service = SessionService::new(Arc::new(InMemorySessionCounterRepository::new(0)));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(
                async move { service.next_session_id().await },
            ));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }

        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}

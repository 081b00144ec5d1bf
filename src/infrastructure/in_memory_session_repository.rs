use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::errors::{COUNTER_MISSING_MESSAGE, DomainError},
    infrastructure::SessionCounterRepository,
};

/// In-process counter; the mutex plays the role of the row lock.
pub struct InMemorySessionCounterRepository {
    numero: Mutex<Option<i64>>,
}

impl InMemorySessionCounterRepository {
    pub fn new(initial: i64) -> Self {
        Self {
            numero: Mutex::new(Some(initial)),
        }
    }

    /// Counter table exists but holds no row, as on a misconfigured store.
    pub fn unseeded() -> Self {
        Self {
            numero: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SessionCounterRepository for InMemorySessionCounterRepository {
    async fn increment_and_get(&self) -> Result<i64, DomainError> {
        let mut numero = self.numero.lock().await;

        let Some(current) = *numero else {
            return Err(DomainError::not_found(COUNTER_MISSING_MESSAGE));
        };

        let next = current + 1;
        *numero = Some(next);

        Ok(next)
    }
}

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use crate::{
    domain::errors::{COUNTER_MISSING_MESSAGE, DomainError},
    infrastructure::{SessionCounterRepository, mysql_player_repository::map_sqlx_error},
};

#[derive(Clone)]
pub struct MySqlSessionCounterRepository {
    pool: MySqlPool,
}

impl MySqlSessionCounterRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionCounterRepository for MySqlSessionCounterRepository {
    async fn increment_and_get(&self) -> Result<i64, DomainError> {
        // Row lock on the singleton serializes concurrent issuers, so no two
        // callers can read the same value before either write lands.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let maybe_row = sqlx::query("SELECT numero FROM codiPartida LIMIT 1 FOR UPDATE")
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let Some(row) = maybe_row else {
            return Err(DomainError::not_found(COUNTER_MISSING_MESSAGE));
        };

        let next = row.get::<i64, _>("numero") + 1;

        sqlx::query("UPDATE codiPartida SET numero = ?")
            .bind(next)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(next)
    }
}

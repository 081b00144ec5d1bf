use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row, mysql::MySqlRow};

use crate::{
    domain::{
        errors::{DUPLICATE_TEAM_MESSAGE, DomainError},
        player::{NewPlayer, Player, PlayerPatch},
    },
    infrastructure::PlayerRepository,
};

#[derive(Clone)]
pub struct MySqlPlayerRepository {
    pool: MySqlPool,
}

impl MySqlPlayerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for MySqlPlayerRepository {
    async fn insert(&self, player: NewPlayer) -> Result<Player, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO jugadors (
                numeroPartida, nomGrup, numeroClaus, guanyador,
                dataPartida, darreraConnexio, darreraPosicioX, darreraPosicioY
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(player.session_number)
        .bind(&player.team_name)
        .bind(player.keys_collected)
        .bind(player.is_winner)
        .bind(player.session_date)
        .bind(player.last_connection)
        .bind(player.last_position_x)
        .bind(player.last_position_y)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_id() as i64;
        Ok(player.into_player(id))
    }

    async fn find_by_session_and_name(
        &self,
        session_number: i64,
        team_name: &str,
    ) -> Result<Option<Player>, DomainError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT idGrup, numeroPartida, nomGrup, numeroClaus, guanyador,
                   dataPartida, darreraConnexio, darreraPosicioX, darreraPosicioY
            FROM jugadors
            WHERE numeroPartida = ? AND nomGrup = ?
            "#,
        )
        .bind(session_number)
        .bind(team_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(maybe_row.as_ref().map(row_to_player))
    }

    async fn update(&self, id: i64, patch: PlayerPatch) -> Result<bool, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new("UPDATE jugadors SET ");
        let mut needs_comma = false;

        if let Some(keys_collected) = patch.keys_collected {
            builder.push("numeroClaus = ").push_bind(keys_collected);
            needs_comma = true;
        }

        if let Some(is_winner) = patch.is_winner {
            if needs_comma {
                builder.push(", ");
            }
            builder.push("guanyador = ").push_bind(is_winner);
            needs_comma = true;
        }

        if let Some(last_connection) = patch.last_connection {
            if needs_comma {
                builder.push(", ");
            }
            builder.push("darreraConnexio = ").push_bind(last_connection);
            needs_comma = true;
        }

        if let Some(last_position_x) = patch.last_position_x {
            if needs_comma {
                builder.push(", ");
            }
            builder.push("darreraPosicioX = ").push_bind(last_position_x);
            needs_comma = true;
        }

        if let Some(last_position_y) = patch.last_position_y {
            if needs_comma {
                builder.push(", ");
            }
            builder.push("darreraPosicioY = ").push_bind(last_position_y);
            needs_comma = true;
        }

        if !needs_comma {
            return Err(DomainError::validation(
                "at least one field must be provided for update",
            ));
        }

        builder.push(" WHERE idGrup = ").push_bind(id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<Player>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT idGrup, numeroPartida, nomGrup, numeroClaus, guanyador,
                   dataPartida, darreraConnexio, darreraPosicioX, darreraPosicioY
            FROM jugadors
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(row_to_player).collect())
    }

    async fn delete_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM jugadors WHERE dataPartida < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

fn row_to_player(row: &MySqlRow) -> Player {
    Player {
        id: row.get::<i64, _>("idGrup"),
        session_number: row.get::<i64, _>("numeroPartida"),
        team_name: row.get::<String, _>("nomGrup"),
        keys_collected: row.get::<i64, _>("numeroClaus"),
        is_winner: row.get::<bool, _>("guanyador"),
        session_date: row.get::<NaiveDate, _>("dataPartida"),
        last_connection: row.get::<NaiveDateTime, _>("darreraConnexio"),
        last_position_x: row.get::<f64, _>("darreraPosicioX"),
        last_position_y: row.get::<f64, _>("darreraPosicioY"),
    }
}

pub(crate) fn map_sqlx_error(error: sqlx::Error) -> DomainError {
    match error {
        // The UNIQUE KEY on (numeroPartida, nomGrup) is the authoritative
        // guard; the registry's pre-check only exists for a friendlier payload.
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            DomainError::conflict(DUPLICATE_TEAM_MESSAGE, None)
        }
        other => DomainError::storage(other.to_string()),
    }
}

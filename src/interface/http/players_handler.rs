use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;

use crate::{
    application::dto::{
        BAD_CUTOFF_DATE, MessageResponse, PlayerRegistered, PlayerResponse, PurgeRequest,
        PurgeResponse, RegisterPlayerRequest, UpdatePlayerRequest,
    },
    domain::errors::DomainError,
    interface::http::problem::{ApiProblem, ApiResult},
    state::AppState,
};

pub async fn healthcheck() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "API Castellet connexió OK!",
    })
}

pub async fn list_players(State(state): State<AppState>) -> ApiResult<Json<Vec<PlayerResponse>>> {
    let players = state
        .player_service
        .list_all()
        .await
        .map_err(ApiProblem::from_domain)?;

    Ok(Json(players))
}

pub async fn register_player(
    State(state): State<AppState>,
    Json(request): Json<RegisterPlayerRequest>,
) -> ApiResult<(StatusCode, Json<PlayerRegistered>)> {
    let created = state
        .player_service
        .register(request)
        .await
        .map_err(ApiProblem::from_domain)?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePlayerRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .player_service
        .update(id, request)
        .await
        .map_err(ApiProblem::from_domain)?;

    Ok(Json(MessageResponse {
        message: "Jugador actualitzat correctament!",
    }))
}

/// The request body is optional: without one, the cutoff defaults to today.
pub async fn purge_old_players(
    State(state): State<AppState>,
    body: Option<Json<PurgeRequest>>,
) -> ApiResult<Json<PurgeResponse>> {
    let cutoff = body
        .and_then(|Json(request)| request.data)
        .map(|raw| parse_cutoff(&raw))
        .transpose()?;

    let outcome = state
        .retention_service
        .purge_older_than(cutoff)
        .await
        .map_err(ApiProblem::from_domain)?;

    Ok(Json(outcome))
}

fn parse_cutoff(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiProblem::from_domain(DomainError::validation(BAD_CUTOFF_DATE)))
}

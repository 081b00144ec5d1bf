use axum::{Json, extract::State};

use crate::{
    application::dto::NewSessionResponse,
    domain::errors::DomainError,
    interface::http::problem::{ApiProblem, ApiResult},
    state::AppState,
};

pub async fn new_session(State(state): State<AppState>) -> ApiResult<Json<NewSessionResponse>> {
    let session_id = state
        .session_service
        .next_session_id()
        .await
        .map_err(|error| match error {
            // A missing counter row means a misconfigured store, not a bad
            // request: surface it as a server-side failure.
            DomainError::NotFound(detail) => ApiProblem::internal(detail),
            other => ApiProblem::from_domain(other),
        })?;

    Ok(Json(NewSessionResponse { session_id }))
}

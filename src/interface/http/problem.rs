use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::errors::DomainError;

pub type ApiResult<T> = Result<T, ApiProblem>;

/// Error payload: `{error}` plus, on a registration conflict, the colliding
/// row's `idGrup` so the caller can decide what to do with it.
#[derive(Debug)]
pub struct ApiProblem {
    status: StatusCode,
    error: String,
    existing_id: Option<i64>,
}

impl ApiProblem {
    pub fn from_domain(error: DomainError) -> Self {
        match error {
            DomainError::Validation(detail) => Self::new(StatusCode::BAD_REQUEST, detail),
            DomainError::NotFound(detail) => Self::new(StatusCode::NOT_FOUND, detail),
            // Registration conflicts go out as 400, not 409; deployed game
            // clients key off that status.
            DomainError::Conflict {
                detail,
                existing_id,
            } => Self {
                status: StatusCode::BAD_REQUEST,
                error: detail,
                existing_id,
            },
            DomainError::Storage(detail) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            error: detail.into(),
            existing_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(rename = "idGrup", skip_serializing_if = "Option::is_none")]
    existing_id: Option<i64>,
}

impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            existing_id: self.existing_id,
        };

        (self.status, Json(body)).into_response()
    }
}

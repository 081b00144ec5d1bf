use axum::{
    Router,
    http::{HeaderName, Method},
    routing::{delete, get, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    interface::http::{
        players_handler::{
            healthcheck, list_players, purge_old_players, register_player, update_player,
        },
        sessions_handler::new_session,
    },
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/", get(healthcheck))
        .route("/jugadors", get(list_players).post(register_player))
        .route("/jugadors/antics", delete(purge_old_players))
        .route("/jugadors/{idGrup}", put(update_player))
        .route("/novapartida", get(new_session))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .with_state(state)
}

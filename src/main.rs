use std::sync::Arc;

use anyhow::{Context, Result};
use castellet_api::{
    application::{
        player_service::PlayerService, retention_service::RetentionService,
        session_service::SessionService,
    },
    build_router,
    config::AppConfig,
    infrastructure::{
        mysql_player_repository::MySqlPlayerRepository,
        mysql_session_repository::MySqlSessionCounterRepository,
    },
    state::AppState,
};
use sqlx::mysql::MySqlPoolOptions;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to MySQL")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    info!("connectat a MySQL");

    let player_repository = Arc::new(MySqlPlayerRepository::new(pool.clone()));
    let counter_repository = Arc::new(MySqlSessionCounterRepository::new(pool.clone()));

    let state = AppState::new(
        Arc::new(PlayerService::new(player_repository.clone())),
        Arc::new(SessionService::new(counter_repository)),
        Arc::new(RetentionService::new(player_repository)),
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(bind_addr = %config.bind_addr, "servidor escoltant");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("castellet_api=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

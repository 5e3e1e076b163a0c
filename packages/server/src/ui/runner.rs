//! Server startup: storage bootstrap, dispatcher, router and listener.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::TrackRepository,
    error::ServerError,
    infrastructure::{database, repository::SqliteTrackRepository},
    ui::{
        dispatcher::CommandDispatcher,
        handler::{get_playlist_snapshot, health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

const DISPATCHER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Bind `config.bind_address()` and serve until Ctrl-C or SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    run_with_listener(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// The database is migrated and the default playlist prepared before the
/// first connection is accepted.
pub async fn run_with_listener<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let pool = database::connect(&config.database_url).await?;
    let track_repository: Arc<dyn TrackRepository> = Arc::new(SqliteTrackRepository::new(pool));
    database::prepare_default_playlist(track_repository.as_ref(), config.seed_default_songs)
        .await?;

    let (dispatcher, dispatcher_task) = CommandDispatcher::new(track_repository).spawn();
    let app = build_router(AppState::new(dispatcher));

    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    // Upgraded sockets may still hold handles; give them a bounded time to drain.
    match tokio::time::timeout(DISPATCHER_DRAIN_TIMEOUT, dispatcher_task).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Command dispatcher task failed: {}", e),
        Err(_) => tracing::warn!("Command dispatcher still busy, stopping anyway"),
    }
    tracing::info!("Server stopped");
    Ok(())
}

/// Routes of the service
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/playlist/{id}", get(get_playlist_snapshot))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

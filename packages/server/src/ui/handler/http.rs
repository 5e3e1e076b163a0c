//! HTTP API endpoint handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::PlaylistId,
    infrastructure::dto::{
        http::{ErrorDto, HealthDto},
        websocket::PlaylistStateDto,
    },
    ui::{dispatcher::DispatcherError, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Current snapshot of a playlist, same shape as the `playlist-state` event.
///
/// A playlist that does not exist yields an empty snapshot, not 404.
pub async fn get_playlist_snapshot(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<Json<PlaylistStateDto>, (StatusCode, Json<ErrorDto>)> {
    let playlist_id = PlaylistId::new(playlist_id).map_err(|e| {
        tracing::warn!("Rejected snapshot request: {}", e);
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    match state.dispatcher.snapshot(playlist_id.clone()).await {
        Ok(snapshot) => Ok(Json(PlaylistStateDto::from(&snapshot))),
        Err(e @ DispatcherError::Closed) => {
            tracing::error!("Snapshot for '{}' failed: {}", playlist_id, e);
            Err(error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
        }
        Err(e @ DispatcherError::Repository(_)) => {
            tracing::error!("Snapshot for '{}' failed: {}", playlist_id, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ))
        }
    }
}

fn error_response(status: StatusCode, message: String) -> (StatusCode, Json<ErrorDto>) {
    (status, Json(ErrorDto { error: message }))
}

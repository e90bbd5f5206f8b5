/// Monitors API routes
use crate::{
    api::extract::{JsonBody, NameRequest, PathParam},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use lumen_core::{
    storage::StorageContext,
    types::{CreateMonitor, Monitor, MonitorId, PlaylistId, ResolvedMonitor},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub playlist_id: Option<String>,
}

impl LinkRequest {
    fn into_playlist_id(self) -> Result<PlaylistId> {
        match self.playlist_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(PlaylistId::new(id)),
            _ => Err(ServerError::BadRequest("playlistId is required".to_string())),
        }
    }
}

/// GET /monitores
/// List monitors with their playlists and media resolved
pub async fn list_monitors(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ResolvedMonitor>>> {
    let monitors = app_state.db.get_resolved_monitors().await?;
    Ok(Json(monitors))
}

/// POST /monitores
pub async fn create_monitor(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<NameRequest>,
) -> Result<(StatusCode, Json<Monitor>)> {
    let name = req.into_name()?;
    let monitor = app_state.db.create_monitor(CreateMonitor { name }).await?;

    tracing::info!("Created monitor {} ({})", monitor.id, monitor.name);
    Ok((StatusCode::CREATED, Json(monitor)))
}

/// GET /monitores/:id
pub async fn get_monitor(
    PathParam(id): PathParam<String>,
    State(app_state): State<AppState>,
) -> Result<Json<ResolvedMonitor>> {
    let monitor = app_state
        .db
        .get_resolved_monitor(&MonitorId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Monitor not found".to_string()))?;

    Ok(Json(monitor))
}

/// PUT /monitores/:id
pub async fn rename_monitor(
    PathParam(id): PathParam<String>,
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<NameRequest>,
) -> Result<Json<Monitor>> {
    let name = req.into_name()?;
    let monitor = app_state
        .db
        .rename_monitor(&MonitorId::new(id), &name)
        .await?
        .ok_or_else(|| ServerError::NotFound("Monitor not found".to_string()))?;

    Ok(Json(monitor))
}

/// DELETE /monitores/:id
/// Delete a monitor, returning it; 404 if it does not exist
pub async fn delete_monitor(
    PathParam(id): PathParam<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Monitor>> {
    let monitor = app_state
        .db
        .delete_monitor(&MonitorId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Monitor not found".to_string()))?;

    tracing::info!("Deleted monitor {}", monitor.id);
    Ok(Json(monitor))
}

/// POST /monitores/:monitorId/playlists
/// Add a playlist to the monitor's association set
pub async fn link_playlist(
    PathParam(monitor_id): PathParam<String>,
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<LinkRequest>,
) -> Result<Json<ResolvedMonitor>> {
    let playlist_id = req.into_playlist_id()?;
    let monitor = app_state
        .associations
        .link(&MonitorId::new(monitor_id), &playlist_id)
        .await?;

    Ok(Json(monitor))
}

/// PUT /monitores/:monitorId/playlists
/// Replace the monitor's association set with the given playlist
pub async fn relink_playlist(
    PathParam(monitor_id): PathParam<String>,
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<LinkRequest>,
) -> Result<Json<ResolvedMonitor>> {
    let playlist_id = req.into_playlist_id()?;
    let monitor = app_state
        .associations
        .relink(&MonitorId::new(monitor_id), &playlist_id)
        .await?;

    Ok(Json(monitor))
}

/// DELETE /monitores/:monitorId/playlists/:playlistId
pub async fn unlink_playlist(
    PathParam((monitor_id, playlist_id)): PathParam<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<Json<ResolvedMonitor>> {
    let monitor = app_state
        .associations
        .unlink(&MonitorId::new(monitor_id), &PlaylistId::new(playlist_id))
        .await?;

    Ok(Json(monitor))
}

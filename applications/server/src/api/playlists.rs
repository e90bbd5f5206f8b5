/// Playlists API routes
use crate::{
    api::extract::{JsonBody, NameRequest, PathParam},
    error::{Result, ServerError},
    services::UploadedFile,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use lumen_core::{
    storage::StorageContext,
    types::{CreatePlaylist, MediaId, MediaItem, Playlist, PlaylistId},
};

/// Multipart field carrying uploaded files (`midias[]` is accepted too)
const MEDIA_FIELD: &str = "midias";

/// GET /playlists
pub async fn list_playlists(State(app_state): State<AppState>) -> Result<Json<Vec<Playlist>>> {
    let playlists = app_state.db.get_all_playlists().await?;
    Ok(Json(playlists))
}

/// POST /playlists
/// Create a new, empty playlist
pub async fn create_playlist(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<NameRequest>,
) -> Result<(StatusCode, Json<Playlist>)> {
    let name = req.into_name()?;
    let playlist = app_state
        .db
        .create_playlist(CreatePlaylist { name })
        .await?;

    tracing::info!("Created playlist {} ({})", playlist.id, playlist.name);
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /playlists/:id
pub async fn get_playlist(
    PathParam(id): PathParam<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Playlist>> {
    let playlist = app_state
        .db
        .get_playlist(&PlaylistId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(playlist))
}

/// PUT /playlists/:id
/// Rename a playlist
pub async fn rename_playlist(
    PathParam(id): PathParam<String>,
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<NameRequest>,
) -> Result<Json<Playlist>> {
    let name = req.into_name()?;
    let playlist = app_state
        .db
        .rename_playlist(&PlaylistId::new(id), &name)
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(playlist))
}

/// DELETE /playlists/:id
/// Delete a playlist; succeeds whether or not it existed
pub async fn delete_playlist(
    PathParam(id): PathParam<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    app_state
        .playlists
        .delete_playlist(&PlaylistId::new(id))
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /playlists/:id/midias
/// Upload files and append them to the playlist in upload order
pub async fn upload_media(
    PathParam(id): PathParam<String>,
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<MediaItem>>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = multer::parse_boundary(content_type)?;
    let body = body?;

    let files = read_uploads(body, boundary).await?;

    let media = app_state
        .playlists
        .attach_media(&PlaylistId::new(id), files)
        .await?;

    Ok(Json(media))
}

/// DELETE /playlists/:playlistId/midias/:midiaId
/// Remove one media item, returning the remaining list
pub async fn remove_media(
    PathParam((playlist_id, media_id)): PathParam<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MediaItem>>> {
    let media = app_state
        .playlists
        .remove_media(&PlaylistId::new(playlist_id), &MediaId::new(media_id))
        .await?;

    Ok(Json(media))
}

/// Collect the file parts of a multipart body, in the order they were sent
async fn read_uploads(body: Bytes, boundary: String) -> Result<Vec<UploadedFile>> {
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let is_media = matches!(
            field.name().and_then(|n| n.strip_suffix("[]").or(Some(n))),
            Some(MEDIA_FIELD)
        );
        if !is_media {
            tracing::debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            return Err(ServerError::BadRequest(format!(
                "Field '{}' must carry a file",
                MEDIA_FIELD
            )));
        };

        let data = field.bytes().await?;
        files.push(UploadedFile { file_name, data });
    }

    Ok(files)
}

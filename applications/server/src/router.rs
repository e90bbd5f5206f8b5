/// HTTP router
use crate::{api, error::ServerError, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// Uploaded files are served read-only under the media store's public
/// prefix, straight from its directory. Unknown paths and methods answer with
/// the same `{"message"}` body as every other error.
pub fn create_router(app_state: AppState, max_upload_bytes: usize) -> Router {
    let playlist_routes = Router::new()
        .route(
            "/playlists",
            get(api::playlists::list_playlists)
                .post(api::playlists::create_playlist)
                .fallback(method_not_allowed),
        )
        .route(
            "/playlists/:id",
            get(api::playlists::get_playlist)
                .put(api::playlists::rename_playlist)
                .delete(api::playlists::delete_playlist)
                .fallback(method_not_allowed),
        )
        .route(
            "/playlists/:id/midias",
            post(api::playlists::upload_media)
                .layer(DefaultBodyLimit::max(max_upload_bytes))
                .fallback(method_not_allowed),
        )
        .route(
            "/playlists/:id/midias/:media_id",
            delete(api::playlists::remove_media).fallback(method_not_allowed),
        );

    let monitor_routes = Router::new()
        .route(
            "/monitores",
            get(api::monitors::list_monitors)
                .post(api::monitors::create_monitor)
                .fallback(method_not_allowed),
        )
        .route(
            "/monitores/:id",
            get(api::monitors::get_monitor)
                .put(api::monitors::rename_monitor)
                .delete(api::monitors::delete_monitor)
                .fallback(method_not_allowed),
        )
        .route(
            "/monitores/:id/playlists",
            post(api::monitors::link_playlist)
                .put(api::monitors::relink_playlist)
                .fallback(method_not_allowed),
        )
        .route(
            "/monitores/:id/playlists/:playlist_id",
            delete(api::monitors::unlink_playlist).fallback(method_not_allowed),
        );

    let media = ServeDir::new(app_state.media_store.base_path())
        .not_found_service(not_found.into_service());
    let public_prefix = app_state.media_store.public_prefix().to_string();

    Router::new()
        .route("/health", get(api::health::health).fallback(method_not_allowed))
        .merge(playlist_routes)
        .merge(monitor_routes)
        .nest_service(&public_prefix, media)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn not_found() -> ServerError {
    ServerError::NotFound("Resource not found".to_string())
}

async fn method_not_allowed() -> ServerError {
    ServerError::Rejected(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method not allowed".to_string(),
    )
}

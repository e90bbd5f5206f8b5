/// Shared application state
use crate::services::{AssociationService, MediaStore, PlaylistService};
use lumen_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub media_store: Arc<MediaStore>,
    pub playlists: Arc<PlaylistService>,
    pub associations: Arc<AssociationService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, media_store: Arc<MediaStore>) -> Self {
        Self {
            playlists: Arc::new(PlaylistService::new(
                Arc::clone(&db),
                Arc::clone(&media_store),
            )),
            associations: Arc::new(AssociationService::new(Arc::clone(&db))),
            db,
            media_store,
        }
    }
}

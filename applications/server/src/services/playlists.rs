/// Playlist service - keeps playlist media and stored files in step
///
/// Every path that drops a media item from the database also drops its file
/// from the media store: single removal, whole-playlist deletion, and the
/// rollback of an upload whose database write failed.
use crate::{
    error::{Result, ServerError},
    services::media_store::{MediaStore, StoredMedia},
};
use bytes::Bytes;
use lumen_core::{
    storage::StorageContext,
    types::{MediaId, MediaItem, NewMediaItem, PlaylistId},
};
use lumen_storage::Database;
use std::sync::Arc;

/// One file from an upload request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the client
    pub file_name: String,
    pub data: Bytes,
}

pub struct PlaylistService {
    db: Arc<Database>,
    media_store: Arc<MediaStore>,
}

impl PlaylistService {
    pub fn new(db: Arc<Database>, media_store: Arc<MediaStore>) -> Self {
        Self { db, media_store }
    }

    /// Store uploaded files and append them to a playlist, in upload order
    ///
    /// The playlist is checked first, so a missing playlist is reported as
    /// `NotFound` even when no files were sent. Each file is on
    /// disk before any media row references it; if the database write fails
    /// the files written for this request are removed again.
    pub async fn attach_media(
        &self,
        playlist_id: &PlaylistId,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<MediaItem>> {
        if self.db.get_playlist(playlist_id).await?.is_none() {
            return Err(ServerError::NotFound("Playlist not found".to_string()));
        }
        if files.is_empty() {
            return Err(ServerError::BadRequest("No files uploaded".to_string()));
        }

        let mut stored: Vec<StoredMedia> = Vec::with_capacity(files.len());
        let mut items = Vec::with_capacity(files.len());

        for file in files {
            match self.media_store.save(&file.file_name, &file.data).await {
                Ok(media) => {
                    items.push(NewMediaItem {
                        display_name: file.file_name,
                        location: media.location.clone(),
                    });
                    stored.push(media);
                }
                Err(e) => {
                    self.release(stored.iter().map(|m| m.location.as_str())).await;
                    return Err(e);
                }
            }
        }

        match self.db.append_media(playlist_id, items).await {
            Ok(media) => {
                tracing::info!(
                    "Attached {} file(s) to playlist {}",
                    stored.len(),
                    playlist_id
                );
                Ok(media)
            }
            Err(e) => {
                self.release(stored.iter().map(|m| m.location.as_str())).await;
                Err(e.into())
            }
        }
    }

    /// Remove one media item and its stored file
    ///
    /// An unknown media id leaves the list unchanged.
    pub async fn remove_media(
        &self,
        playlist_id: &PlaylistId,
        media_id: &MediaId,
    ) -> Result<Vec<MediaItem>> {
        let removal = self.db.remove_media(playlist_id, media_id).await?;

        if let Some(item) = &removal.removed {
            tracing::info!("Removed media {} from playlist {}", item.id, playlist_id);
            self.release(std::iter::once(item.location.as_str())).await;
        }

        Ok(removal.remaining)
    }

    /// Delete a playlist, its stored files, and its monitor links
    ///
    /// Deleting a playlist that does not exist succeeds.
    pub async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        let Some(playlist) = self.db.delete_playlist(playlist_id).await? else {
            tracing::debug!("Playlist {} already gone", playlist_id);
            return Ok(());
        };

        tracing::info!(
            "Deleted playlist {} with {} media item(s)",
            playlist.id,
            playlist.media_items.len()
        );
        self.release(playlist.media_items.iter().map(|m| m.location.as_str()))
            .await;

        Ok(())
    }

    /// Best-effort removal of stored files whose metadata is already gone
    async fn release<'a>(&self, locations: impl Iterator<Item = &'a str>) {
        for location in locations {
            if let Err(e) = self.media_store.delete(location).await {
                tracing::warn!("Could not delete stored media {}: {}", location, e);
            }
        }
    }
}

use crate::{media, monitors, playlists};
use async_trait::async_trait;
use lumen_core::{error::Result, storage::StorageContext, types::*};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
///
/// Owns the connection pool for its whole lifetime; construct one at process
/// start and share it behind an `Arc`.
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Playlists
    async fn get_all_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool).await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<Option<Playlist>> {
        playlists::rename(&self.pool, id, name).await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::delete(&self.pool, id).await
    }

    // Media
    async fn append_media(
        &self,
        playlist_id: &PlaylistId,
        items: Vec<NewMediaItem>,
    ) -> Result<Vec<MediaItem>> {
        media::append(&self.pool, playlist_id, items).await
    }

    async fn remove_media(
        &self,
        playlist_id: &PlaylistId,
        media_id: &MediaId,
    ) -> Result<MediaRemoval> {
        media::remove(&self.pool, playlist_id, media_id).await
    }

    // Monitors
    async fn get_monitor(&self, id: &MonitorId) -> Result<Option<Monitor>> {
        monitors::get_by_id(&self.pool, id).await
    }

    async fn get_resolved_monitors(&self) -> Result<Vec<ResolvedMonitor>> {
        monitors::get_all_resolved(&self.pool).await
    }

    async fn get_resolved_monitor(&self, id: &MonitorId) -> Result<Option<ResolvedMonitor>> {
        monitors::get_resolved(&self.pool, id).await
    }

    async fn create_monitor(&self, monitor: CreateMonitor) -> Result<Monitor> {
        monitors::create(&self.pool, monitor).await
    }

    async fn rename_monitor(&self, id: &MonitorId, name: &str) -> Result<Option<Monitor>> {
        monitors::rename(&self.pool, id, name).await
    }

    async fn delete_monitor(&self, id: &MonitorId) -> Result<Option<Monitor>> {
        monitors::delete(&self.pool, id).await
    }

    // Associations
    async fn link_playlist(
        &self,
        monitor_id: &MonitorId,
        playlist_id: &PlaylistId,
    ) -> Result<()> {
        monitors::link(&self.pool, monitor_id, playlist_id).await
    }

    async fn replace_playlists(
        &self,
        monitor_id: &MonitorId,
        playlist_ids: &[PlaylistId],
    ) -> Result<()> {
        monitors::replace(&self.pool, monitor_id, playlist_ids).await
    }

    async fn unlink_playlist(
        &self,
        monitor_id: &MonitorId,
        playlist_id: &PlaylistId,
    ) -> Result<bool> {
        monitors::unlink(&self.pool, monitor_id, playlist_id).await
    }
}

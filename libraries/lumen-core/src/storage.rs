//! Storage trait for the playlist/monitor catalog

use crate::error::Result;
use crate::types::{
    CreateMonitor, CreatePlaylist, MediaId, MediaItem, MediaRemoval, Monitor, MonitorId,
    NewMediaItem, Playlist, PlaylistId, ResolvedMonitor,
};
use async_trait::async_trait;

/// Storage context providing access to database operations
///
/// Every mutation is one atomic read-modify-write against the backing
/// store. Implementations that cannot guarantee single-record atomicity
/// must wrap each mutation in a transaction.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Playlists
    // ========================================================================

    /// Get all playlists with their media, in creation order
    async fn get_all_playlists(&self) -> Result<Vec<Playlist>>;

    /// Get playlist by ID, with media
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Create a new, empty playlist
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// Rename a playlist, `None` if it does not exist
    async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<Option<Playlist>>;

    /// Delete a playlist and detach it from every monitor.
    ///
    /// Returns the deleted playlist (with media) so callers can release
    /// stored files, or `None` if nothing was deleted.
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    // ========================================================================
    // Media
    // ========================================================================

    /// Append media to the end of a playlist, preserving the given order.
    ///
    /// Fails with `NotFound` if the playlist does not exist. Returns the full
    /// updated media list.
    async fn append_media(
        &self,
        playlist_id: &PlaylistId,
        items: Vec<NewMediaItem>,
    ) -> Result<Vec<MediaItem>>;

    /// Remove one media item from a playlist.
    ///
    /// Fails with `NotFound` if the playlist does not exist; an unknown media
    /// id leaves the list unchanged.
    async fn remove_media(
        &self,
        playlist_id: &PlaylistId,
        media_id: &MediaId,
    ) -> Result<MediaRemoval>;

    // ========================================================================
    // Monitors
    // ========================================================================

    /// Get monitor by ID
    async fn get_monitor(&self, id: &MonitorId) -> Result<Option<Monitor>>;

    /// Get all monitors with playlists and media resolved
    async fn get_resolved_monitors(&self) -> Result<Vec<ResolvedMonitor>>;

    /// Get one monitor with playlists and media resolved
    async fn get_resolved_monitor(&self, id: &MonitorId) -> Result<Option<ResolvedMonitor>>;

    /// Create a new monitor with no playlists
    async fn create_monitor(&self, monitor: CreateMonitor) -> Result<Monitor>;

    /// Rename a monitor, `None` if it does not exist
    async fn rename_monitor(&self, id: &MonitorId, name: &str) -> Result<Option<Monitor>>;

    /// Delete a monitor, returning it, or `None` if it does not exist
    async fn delete_monitor(&self, id: &MonitorId) -> Result<Option<Monitor>>;

    // ========================================================================
    // Associations
    // ========================================================================

    /// Append a playlist to a monitor's association set.
    ///
    /// Fails with `Duplicate` if the link already exists and `NotFound` if
    /// either side does not exist.
    async fn link_playlist(&self, monitor_id: &MonitorId, playlist_id: &PlaylistId)
        -> Result<()>;

    /// Replace a monitor's entire association set
    async fn replace_playlists(
        &self,
        monitor_id: &MonitorId,
        playlist_ids: &[PlaylistId],
    ) -> Result<()>;

    /// Remove a single link, returning whether it existed
    async fn unlink_playlist(
        &self,
        monitor_id: &MonitorId,
        playlist_id: &PlaylistId,
    ) -> Result<bool>;
}

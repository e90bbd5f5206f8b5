/// Association service - monitor/playlist links
use crate::error::{Result, ServerError};
use lumen_core::{
    storage::StorageContext,
    types::{MonitorId, PlaylistId, ResolvedMonitor},
};
use lumen_storage::Database;
use std::sync::Arc;

/// Enforces the association invariants: both sides exist before a link is
/// made, and a playlist appears at most once per monitor.
pub struct AssociationService {
    db: Arc<Database>,
}

impl AssociationService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Append a playlist to a monitor's association set
    ///
    /// # Errors
    ///
    /// - `NotFound` if the monitor or the playlist does not exist
    /// - `Conflict` if the playlist is already linked to the monitor
    pub async fn link(
        &self,
        monitor_id: &MonitorId,
        playlist_id: &PlaylistId,
    ) -> Result<ResolvedMonitor> {
        let mut monitor = self
            .db
            .get_monitor(monitor_id)
            .await?
            .ok_or_else(|| ServerError::NotFound("Monitor not found".to_string()))?;

        self.require_playlist(playlist_id).await?;

        if !monitor.link(playlist_id.clone()) {
            return Err(ServerError::Conflict(
                "Playlist already linked to this monitor".to_string(),
            ));
        }

        // A concurrent link of the same pair surfaces as Duplicate -> Conflict
        self.db.link_playlist(monitor_id, playlist_id).await?;
        tracing::info!("Linked playlist {} to monitor {}", playlist_id, monitor_id);

        self.resolved(monitor_id).await
    }

    /// Replace a monitor's entire association set with one playlist
    pub async fn relink(
        &self,
        monitor_id: &MonitorId,
        playlist_id: &PlaylistId,
    ) -> Result<ResolvedMonitor> {
        self.require_monitor(monitor_id).await?;
        self.require_playlist(playlist_id).await?;

        self.db
            .replace_playlists(monitor_id, std::slice::from_ref(playlist_id))
            .await?;
        tracing::info!(
            "Monitor {} now shows only playlist {}",
            monitor_id,
            playlist_id
        );

        self.resolved(monitor_id).await
    }

    /// Remove one playlist from a monitor's association set
    pub async fn unlink(
        &self,
        monitor_id: &MonitorId,
        playlist_id: &PlaylistId,
    ) -> Result<ResolvedMonitor> {
        self.require_monitor(monitor_id).await?;

        if !self.db.unlink_playlist(monitor_id, playlist_id).await? {
            return Err(ServerError::NotFound(
                "Playlist is not linked to this monitor".to_string(),
            ));
        }
        tracing::info!("Unlinked playlist {} from monitor {}", playlist_id, monitor_id);

        self.resolved(monitor_id).await
    }

    async fn require_monitor(&self, monitor_id: &MonitorId) -> Result<()> {
        match self.db.get_monitor(monitor_id).await? {
            Some(_) => Ok(()),
            None => Err(ServerError::NotFound("Monitor not found".to_string())),
        }
    }

    async fn require_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        match self.db.get_playlist(playlist_id).await? {
            Some(_) => Ok(()),
            None => Err(ServerError::NotFound("Playlist not found".to_string())),
        }
    }

    async fn resolved(&self, monitor_id: &MonitorId) -> Result<ResolvedMonitor> {
        self.db
            .get_resolved_monitor(monitor_id)
            .await?
            .ok_or_else(|| ServerError::NotFound("Monitor not found".to_string()))
    }
}

/// Monitor domain types
use super::{ids::MonitorId, ids::PlaylistId, playlist::Playlist};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A display endpoint and the playlists it should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    /// Unique monitor identifier
    pub id: MonitorId,

    /// Display label
    pub name: String,

    /// Linked playlists in link order, without duplicates
    pub playlist_ids: Vec<PlaylistId>,

    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,

    /// Last modification timestamp (Unix epoch seconds)
    pub updated_at: i64,
}

impl Monitor {
    /// Create a new monitor with no playlists
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: MonitorId::generate(),
            name: name.into(),
            playlist_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the playlist is already linked
    pub fn is_linked(&self, playlist_id: &PlaylistId) -> bool {
        self.playlist_ids.contains(playlist_id)
    }

    /// Append a playlist to the association set.
    ///
    /// Returns `false` and leaves the set untouched if it was already linked.
    pub fn link(&mut self, playlist_id: PlaylistId) -> bool {
        if self.is_linked(&playlist_id) {
            return false;
        }
        self.playlist_ids.push(playlist_id);
        true
    }
}

/// Monitor with its playlists (and their media) resolved for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMonitor {
    /// Unique monitor identifier
    pub id: MonitorId,

    /// Display label
    pub name: String,

    /// Linked playlists in link order
    pub playlists: Vec<Playlist>,

    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,

    /// Last modification timestamp (Unix epoch seconds)
    pub updated_at: i64,
}

/// Data for creating a new monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMonitor {
    /// Monitor name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_rejects_duplicates() {
        let mut monitor = Monitor::new("Lobby Screen");
        let playlist = PlaylistId::new("p-1");

        assert!(monitor.link(playlist.clone()));
        assert!(!monitor.link(playlist.clone()));
        assert_eq!(monitor.playlist_ids, vec![playlist]);
    }

    #[test]
    fn link_preserves_order() {
        let mut monitor = Monitor::new("Hall");
        monitor.link(PlaylistId::new("b"));
        monitor.link(PlaylistId::new("a"));

        let ids: Vec<&str> = monitor.playlist_ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}

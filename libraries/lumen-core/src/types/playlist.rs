/// Playlist and media item domain types
use super::ids::{MediaId, PlaylistId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Named, ordered collection of media items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display label
    pub name: String,

    /// Media items in playback order
    pub media_items: Vec<MediaItem>,

    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,

    /// Last modification timestamp (Unix epoch seconds)
    pub updated_at: i64,
}

impl Playlist {
    /// Create a new, empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            media_items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Metadata for one uploaded file, owned by a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Media identifier
    pub id: MediaId,

    /// Original filename at upload time
    pub display_name: String,

    /// Reference to the stored file, resolvable by the static file server
    pub location: String,

    /// Zero-based playback position
    pub position: i64,

    /// When the item was appended (Unix epoch seconds)
    pub added_at: i64,
}

/// Media item about to be appended to a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    /// Original filename
    pub display_name: String,

    /// Location returned by the media store
    pub location: String,
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    /// Playlist name
    pub name: String,
}

/// Outcome of removing a media item from a playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRemoval {
    /// The removed item, `None` if no item had the requested id
    pub removed: Option<MediaItem>,

    /// Remaining media in playback order
    pub remaining: Vec<MediaItem>,
}

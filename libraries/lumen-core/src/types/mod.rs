//! Domain types for playlists, media items and monitors

mod ids;
mod monitor;
mod playlist;

pub use ids::{MediaId, MonitorId, PlaylistId};
pub use monitor::{CreateMonitor, Monitor, ResolvedMonitor};
pub use playlist::{CreatePlaylist, MediaItem, MediaRemoval, NewMediaItem, Playlist};

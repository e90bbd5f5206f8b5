//! Lumen Core
//!
//! Domain types, storage trait, and error handling for the Lumen indoor media
//! catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `MediaItem`, `Monitor`, and their identifiers
//! - **Core Traits**: `StorageContext`, implemented by `lumen-storage`
//! - **Error Handling**: Unified `LumenError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use lumen_core::types::{Monitor, Playlist};
//!
//! let playlist = Playlist::new("Lobby");
//! assert!(playlist.media_items.is_empty());
//!
//! let mut monitor = Monitor::new("Lobby Screen");
//! assert!(monitor.link(playlist.id.clone()));
//! assert!(!monitor.link(playlist.id));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{LumenError, Result};
pub use storage::StorageContext;

pub use types::{
    CreateMonitor, CreatePlaylist, MediaId, MediaItem, MediaRemoval, Monitor, MonitorId,
    NewMediaItem, Playlist, PlaylistId, ResolvedMonitor,
};

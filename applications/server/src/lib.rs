//! Lumen Server Library
//!
//! HTTP catalog server for indoor media displays: playlists of uploaded
//! media, and the monitors that show them.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::{AssociationService, MediaStore, PlaylistService};
pub use state::AppState;

//! Lumen Storage
//!
//! `SQLite` database layer for the Lumen indoor media catalog.
//!
//! This crate persists playlists (with their ordered media items), monitors,
//! and the monitor/playlist association set.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each feature owns its own queries and logic
//! - **Atomic Mutations**: Every read-modify-write runs in one transaction
//! - **Referential Integrity**: Foreign keys cascade media and links away
//!   with their owners
//!
//! # Example
//!
//! ```rust,no_run
//! use lumen_storage::{LocalStorageContext, create_pool, run_migrations};
//! use lumen_core::storage::StorageContext;
//! use lumen_core::types::CreatePlaylist;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://lumen.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//! storage.create_playlist(CreatePlaylist { name: "Lobby".into() }).await?;
//! let playlists = storage.get_all_playlists().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod media;
pub mod monitors;
pub mod playlists;

pub use context::LocalStorageContext;
pub use error::StorageError;

// Name used by the server's application state
pub type Database = LocalStorageContext;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> error::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// The parent directory of a file-backed database is created if needed.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://lumen.db`)
pub async fn create_pool(database_url: &str) -> error::Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("Pool created");

    Ok(pool)
}

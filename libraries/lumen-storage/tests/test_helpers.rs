//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! so the pool's connections share one database and migrations, foreign keys
//! and constraints behave as in production.

#![allow(dead_code)]

use lumen_core::types::*;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = lumen_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        lumen_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create a playlist
pub async fn create_test_playlist(pool: &SqlitePool, name: &str) -> PlaylistId {
    lumen_storage::playlists::create(
        pool,
        CreatePlaylist {
            name: name.to_string(),
        },
    )
    .await
    .expect("Failed to create test playlist")
    .id
}

/// Test fixture: Create a monitor
pub async fn create_test_monitor(pool: &SqlitePool, name: &str) -> MonitorId {
    lumen_storage::monitors::create(
        pool,
        CreateMonitor {
            name: name.to_string(),
        },
    )
    .await
    .expect("Failed to create test monitor")
    .id
}

/// Test fixture: Media item metadata as the media store would produce it
pub fn new_media(display_name: &str) -> NewMediaItem {
    NewMediaItem {
        display_name: display_name.to_string(),
        location: format!("/uploads/{}", display_name),
    }
}

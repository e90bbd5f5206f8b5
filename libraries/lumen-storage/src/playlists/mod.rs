//! Playlists vertical slice
//!
//! A playlist owns its media items; they are loaded alongside it and deleted
//! with it (`ON DELETE CASCADE`). Monitor links to a deleted playlist are
//! cascaded away as well.

use crate::media;
use lumen_core::{error::Result, types::*};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};

fn playlist_from_row(row: &SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        name: row.get("name"),
        media_items: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Get all playlists with their media, in creation order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, name, created_at, updated_at FROM playlists ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?;

    let mut media_by_playlist = media::get_all_grouped(pool).await?;

    Ok(rows
        .iter()
        .map(|row| {
            let mut playlist = playlist_from_row(row);
            playlist.media_items = media_by_playlist.remove(&playlist.id).unwrap_or_default();
            playlist
        })
        .collect())
}

/// Get playlist by ID, with media
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

/// Load a playlist and its media on an existing connection
pub(crate) async fn fetch(conn: &mut SqliteConnection, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, created_at, updated_at FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut playlist = playlist_from_row(&row);
    playlist.media_items = media::fetch_for_playlist(conn, id).await?;
    Ok(Some(playlist))
}

/// Whether a playlist exists
pub(crate) async fn exists(conn: &mut SqliteConnection, id: &PlaylistId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Bump `updated_at`, returning whether the playlist exists.
///
/// Used as the first statement of a mutation so the transaction takes the
/// write lock before it reads anything.
pub(crate) async fn touch(conn: &mut SqliteConnection, id: &PlaylistId) -> Result<bool> {
    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let playlist = Playlist::new(playlist.name);

    sqlx::query("INSERT INTO playlists (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)")
        .bind(&playlist.id)
        .bind(&playlist.name)
        .bind(playlist.created_at)
        .bind(playlist.updated_at)
        .execute(pool)
        .await?;

    Ok(playlist)
}

/// Rename a playlist
pub async fn rename(pool: &SqlitePool, id: &PlaylistId, name: &str) -> Result<Option<Playlist>> {
    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query("UPDATE playlists SET name = ?, updated_at = ? WHERE id = ?")
        .bind(name)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_by_id(pool, id).await
}

/// Delete playlist
///
/// Returns the deleted playlist with its media, or `None` if it did not
/// exist. Media rows and monitor links go with it.
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let mut tx = pool.begin().await?;

    // Take the write lock first, then snapshot what is about to go
    if !touch(&mut tx, id).await? {
        return Ok(None);
    }
    let playlist = fetch(&mut tx, id).await?;

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(playlist)
}

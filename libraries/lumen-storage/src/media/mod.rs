//! Media items embedded in playlists
//!
//! Positions are zero-based and kept dense: appends take `MAX(position) + 1`
//! and removals shift every later item down by one.

use crate::playlists;
use lumen_core::{error::Result, types::*, LumenError};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use std::collections::HashMap;

fn media_from_row(row: &SqliteRow) -> MediaItem {
    MediaItem {
        id: row.get("id"),
        display_name: row.get("display_name"),
        location: row.get("location"),
        position: row.get("position"),
        added_at: row.get("added_at"),
    }
}

/// Get every media item, grouped by playlist and ordered by position
pub async fn get_all_grouped(pool: &SqlitePool) -> Result<HashMap<PlaylistId, Vec<MediaItem>>> {
    let rows = sqlx::query(
        r#"
        SELECT id, playlist_id, position, display_name, location, added_at
        FROM media_items
        ORDER BY playlist_id, position
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<PlaylistId, Vec<MediaItem>> = HashMap::new();
    for row in &rows {
        let playlist_id: PlaylistId = row.get("playlist_id");
        grouped.entry(playlist_id).or_default().push(media_from_row(row));
    }
    Ok(grouped)
}

/// Get the media of one playlist in playback order
pub async fn get_for_playlist(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<MediaItem>> {
    let mut conn = pool.acquire().await?;
    fetch_for_playlist(&mut conn, playlist_id).await
}

pub(crate) async fn fetch_for_playlist(
    conn: &mut SqliteConnection,
    playlist_id: &PlaylistId,
) -> Result<Vec<MediaItem>> {
    let rows = sqlx::query(
        r#"
        SELECT id, position, display_name, location, added_at
        FROM media_items
        WHERE playlist_id = ?
        ORDER BY position
        "#,
    )
    .bind(playlist_id)
    .fetch_all(conn)
    .await?;

    Ok(rows.iter().map(media_from_row).collect())
}

/// Append media to the end of a playlist
///
/// All items are inserted in one transaction, in the given order. Returns the
/// full media list after the append.
pub async fn append(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    items: Vec<NewMediaItem>,
) -> Result<Vec<MediaItem>> {
    let mut tx = pool.begin().await?;

    if !playlists::touch(&mut tx, playlist_id).await? {
        return Err(LumenError::not_found("Playlist", playlist_id.as_str()));
    }

    let next_position_row = sqlx::query(
        "SELECT COALESCE(MAX(position) + 1, 0) AS next_pos FROM media_items WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(&mut *tx)
    .await?;
    let mut position: i64 = next_position_row.get("next_pos");

    let now = chrono::Utc::now().timestamp();
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO media_items (id, playlist_id, position, display_name, location, added_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(MediaId::generate())
        .bind(playlist_id)
        .bind(position)
        .bind(&item.display_name)
        .bind(&item.location)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        position += 1;
    }

    let media = fetch_for_playlist(&mut tx, playlist_id).await?;
    tx.commit().await?;

    Ok(media)
}

/// Remove one media item from a playlist
///
/// An unknown media id is not an error: `removed` is `None` and the list is
/// returned unchanged.
pub async fn remove(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    media_id: &MediaId,
) -> Result<MediaRemoval> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query(
        r#"
        DELETE FROM media_items
        WHERE playlist_id = ? AND id = ?
        RETURNING id, position, display_name, location, added_at
        "#,
    )
    .bind(playlist_id)
    .bind(media_id)
    .fetch_optional(&mut *tx)
    .await?
    .map(|row| media_from_row(&row));

    if let Some(item) = &removed {
        // Close the gap left by the removed item
        sqlx::query(
            "UPDATE media_items SET position = position - 1 WHERE playlist_id = ? AND position > ?",
        )
        .bind(playlist_id)
        .bind(item.position)
        .execute(&mut *tx)
        .await?;

        playlists::touch(&mut tx, playlist_id).await?;
    } else if !playlists::exists(&mut tx, playlist_id).await? {
        return Err(LumenError::not_found("Playlist", playlist_id.as_str()));
    }

    let remaining = fetch_for_playlist(&mut tx, playlist_id).await?;
    tx.commit().await?;

    Ok(MediaRemoval { removed, remaining })
}

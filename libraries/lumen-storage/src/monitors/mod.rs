//! Monitors and their playlist association set
//!
//! Links live in `monitor_playlists`. The composite primary key guarantees a
//! playlist appears at most once per monitor; link order is insertion order.

use crate::playlists;
use lumen_core::{error::Result, types::*, LumenError};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use std::collections::HashMap;

fn monitor_from_row(row: &SqliteRow) -> Monitor {
    Monitor {
        id: row.get("id"),
        name: row.get("name"),
        playlist_ids: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

async fn fetch_playlist_ids(
    conn: &mut SqliteConnection,
    monitor_id: &MonitorId,
) -> Result<Vec<PlaylistId>> {
    let rows = sqlx::query(
        "SELECT playlist_id FROM monitor_playlists WHERE monitor_id = ? ORDER BY rowid",
    )
    .bind(monitor_id)
    .fetch_all(conn)
    .await?;

    Ok(rows.iter().map(|row| row.get("playlist_id")).collect())
}

async fn fetch(conn: &mut SqliteConnection, id: &MonitorId) -> Result<Option<Monitor>> {
    let row = sqlx::query("SELECT id, name, created_at, updated_at FROM monitors WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut monitor = monitor_from_row(&row);
    monitor.playlist_ids = fetch_playlist_ids(conn, id).await?;
    Ok(Some(monitor))
}

async fn monitor_exists(conn: &mut SqliteConnection, id: &MonitorId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM monitors WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

async fn touch(conn: &mut SqliteConnection, id: &MonitorId) -> Result<bool> {
    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query("UPDATE monitors SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Get all monitors with their playlist ids, in creation order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Monitor>> {
    let rows = sqlx::query("SELECT id, name, created_at, updated_at FROM monitors ORDER BY rowid")
        .fetch_all(pool)
        .await?;

    let links = sqlx::query("SELECT monitor_id, playlist_id FROM monitor_playlists ORDER BY rowid")
        .fetch_all(pool)
        .await?;

    let mut links_by_monitor: HashMap<MonitorId, Vec<PlaylistId>> = HashMap::new();
    for link in &links {
        links_by_monitor
            .entry(link.get("monitor_id"))
            .or_default()
            .push(link.get("playlist_id"));
    }

    Ok(rows
        .iter()
        .map(|row| {
            let mut monitor = monitor_from_row(row);
            monitor.playlist_ids = links_by_monitor.remove(&monitor.id).unwrap_or_default();
            monitor
        })
        .collect())
}

/// Get monitor by ID
pub async fn get_by_id(pool: &SqlitePool, id: &MonitorId) -> Result<Option<Monitor>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

/// Get all monitors with playlists (and their media) joined in
pub async fn get_all_resolved(pool: &SqlitePool) -> Result<Vec<ResolvedMonitor>> {
    let monitors = get_all(pool).await?;
    let playlists: HashMap<PlaylistId, Playlist> = playlists::get_all(pool)
        .await?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    Ok(monitors
        .into_iter()
        .map(|monitor| resolve(monitor, &playlists))
        .collect())
}

/// Get one monitor with playlists (and their media) joined in
pub async fn get_resolved(pool: &SqlitePool, id: &MonitorId) -> Result<Option<ResolvedMonitor>> {
    let mut conn = pool.acquire().await?;
    let Some(monitor) = fetch(&mut conn, id).await? else {
        return Ok(None);
    };

    let mut playlists = HashMap::with_capacity(monitor.playlist_ids.len());
    for playlist_id in &monitor.playlist_ids {
        if let Some(playlist) = playlists::fetch(&mut conn, playlist_id).await? {
            playlists.insert(playlist_id.clone(), playlist);
        }
    }

    Ok(Some(resolve(monitor, &playlists)))
}

fn resolve(monitor: Monitor, playlists: &HashMap<PlaylistId, Playlist>) -> ResolvedMonitor {
    ResolvedMonitor {
        playlists: monitor
            .playlist_ids
            .iter()
            .filter_map(|id| playlists.get(id).cloned())
            .collect(),
        id: monitor.id,
        name: monitor.name,
        created_at: monitor.created_at,
        updated_at: monitor.updated_at,
    }
}

/// Create new monitor
pub async fn create(pool: &SqlitePool, monitor: CreateMonitor) -> Result<Monitor> {
    let monitor = Monitor::new(monitor.name);

    sqlx::query("INSERT INTO monitors (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)")
        .bind(&monitor.id)
        .bind(&monitor.name)
        .bind(monitor.created_at)
        .bind(monitor.updated_at)
        .execute(pool)
        .await?;

    Ok(monitor)
}

/// Rename a monitor
pub async fn rename(pool: &SqlitePool, id: &MonitorId, name: &str) -> Result<Option<Monitor>> {
    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query("UPDATE monitors SET name = ?, updated_at = ? WHERE id = ?")
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

/// Delete monitor
///
/// Returns the deleted monitor, or `None` if it did not exist. Playlists are
/// never touched; only the links go.
pub async fn delete(pool: &SqlitePool, id: &MonitorId) -> Result<Option<Monitor>> {
    let mut tx = pool.begin().await?;

    if !touch(&mut tx, id).await? {
        return Ok(None);
    }
    let monitor = fetch(&mut tx, id).await?;

    sqlx::query("DELETE FROM monitors WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(monitor)
}

/// Append a playlist to a monitor's association set
///
/// # Errors
///
/// - `Duplicate` if the playlist is already linked
/// - `NotFound` if the monitor or the playlist does not exist
pub async fn link(pool: &SqlitePool, monitor_id: &MonitorId, playlist_id: &PlaylistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    insert_link(&mut tx, monitor_id, playlist_id).await?;
    touch(&mut tx, monitor_id).await?;

    tx.commit().await?;
    Ok(())
}

/// Replace a monitor's association set
///
/// Duplicates in `playlist_ids` are collapsed, keeping the first occurrence.
pub async fn replace(
    pool: &SqlitePool,
    monitor_id: &MonitorId,
    playlist_ids: &[PlaylistId],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    if !touch(&mut tx, monitor_id).await? {
        return Err(LumenError::not_found("Monitor", monitor_id.as_str()));
    }

    sqlx::query("DELETE FROM monitor_playlists WHERE monitor_id = ?")
        .bind(monitor_id)
        .execute(&mut *tx)
        .await?;

    let mut seen = Vec::with_capacity(playlist_ids.len());
    for playlist_id in playlist_ids {
        if seen.contains(&playlist_id) {
            continue;
        }
        insert_link(&mut tx, monitor_id, playlist_id).await?;
        seen.push(playlist_id);
    }

    tx.commit().await?;
    Ok(())
}

/// Remove one link, returning whether it existed
pub async fn unlink(
    pool: &SqlitePool,
    monitor_id: &MonitorId,
    playlist_id: &PlaylistId,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM monitor_playlists WHERE monitor_id = ? AND playlist_id = ?")
        .bind(monitor_id)
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    let removed = result.rows_affected() > 0;
    if removed {
        touch(&mut tx, monitor_id).await?;
    }

    tx.commit().await?;
    Ok(removed)
}

async fn insert_link(
    conn: &mut SqliteConnection,
    monitor_id: &MonitorId,
    playlist_id: &PlaylistId,
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query(
        "INSERT INTO monitor_playlists (monitor_id, playlist_id, linked_at) VALUES (?, ?, ?)",
    )
    .bind(monitor_id)
    .bind(playlist_id)
    .bind(now)
    .execute(&mut *conn)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(LumenError::duplicate(
            format!("Playlist {} is already linked to monitor {}", playlist_id, monitor_id),
        )),
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
            // Report whichever side is missing
            if monitor_exists(conn, monitor_id).await? {
                Err(LumenError::not_found("Playlist", playlist_id.as_str()))
            } else {
                Err(LumenError::not_found("Monitor", monitor_id.as_str()))
            }
        }
        Err(e) => Err(e.into()),
    }
}

//! Integration tests for the monitors slice
//!
//! Tests monitor operations including:
//! - CRUD
//! - Association set semantics (append, duplicate rejection, replace, unlink)
//! - Two-level resolution of playlists and media

mod test_helpers;

use lumen_core::{storage::StorageContext, types::*, LumenError};
use lumen_storage::LocalStorageContext;
use test_helpers::*;

#[tokio::test]
async fn test_create_monitor_has_no_playlists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let monitor_id = create_test_monitor(pool, "Lobby Screen").await;

    let monitor = lumen_storage::monitors::get_by_id(pool, &monitor_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(monitor.name, "Lobby Screen");
    assert!(monitor.playlist_ids.is_empty());
}

#[tokio::test]
async fn test_link_twice_is_duplicate() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let monitor_id = create_test_monitor(pool, "Screen").await;
    let playlist_id = create_test_playlist(pool, "Lobby").await;

    lumen_storage::monitors::link(pool, &monitor_id, &playlist_id)
        .await
        .expect("First link should succeed");

    let second = lumen_storage::monitors::link(pool, &monitor_id, &playlist_id).await;
    assert!(matches!(second, Err(LumenError::Duplicate(_))));

    let monitor = lumen_storage::monitors::get_by_id(pool, &monitor_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(monitor.playlist_ids, vec![playlist_id]);
}

#[tokio::test]
async fn test_link_reports_missing_side() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let monitor_id = create_test_monitor(pool, "Screen").await;
    let playlist_id = create_test_playlist(pool, "Lobby").await;

    let err = lumen_storage::monitors::link(pool, &monitor_id, &PlaylistId::new("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, LumenError::NotFound { ref entity, .. } if entity == "Playlist"));

    let err = lumen_storage::monitors::link(pool, &MonitorId::new("nope"), &playlist_id)
        .await
        .unwrap_err();
    assert!(matches!(err, LumenError::NotFound { ref entity, .. } if entity == "Monitor"));
}

#[tokio::test]
async fn test_replace_overwrites_association_set() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let monitor_id = create_test_monitor(pool, "Screen").await;
    let first = create_test_playlist(pool, "Morning").await;
    let second = create_test_playlist(pool, "Evening").await;

    lumen_storage::monitors::link(pool, &monitor_id, &first).await.unwrap();

    lumen_storage::monitors::replace(pool, &monitor_id, &[second.clone(), second.clone()])
        .await
        .unwrap();

    let monitor = lumen_storage::monitors::get_by_id(pool, &monitor_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(monitor.playlist_ids, vec![second]);

    let missing =
        lumen_storage::monitors::replace(pool, &MonitorId::new("nope"), &[first]).await;
    assert!(matches!(missing, Err(LumenError::NotFound { .. })));
}

#[tokio::test]
async fn test_unlink() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let monitor_id = create_test_monitor(pool, "Screen").await;
    let playlist_id = create_test_playlist(pool, "Lobby").await;

    lumen_storage::monitors::link(pool, &monitor_id, &playlist_id).await.unwrap();

    assert!(lumen_storage::monitors::unlink(pool, &monitor_id, &playlist_id)
        .await
        .unwrap());
    assert!(!lumen_storage::monitors::unlink(pool, &monitor_id, &playlist_id)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_delete_monitor() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let monitor_id = create_test_monitor(pool, "Screen").await;
    let playlist_id = create_test_playlist(pool, "Lobby").await;
    lumen_storage::monitors::link(pool, &monitor_id, &playlist_id).await.unwrap();

    let deleted = lumen_storage::monitors::delete(pool, &monitor_id)
        .await
        .unwrap()
        .expect("Monitor should have been deleted");
    assert_eq!(deleted.name, "Screen");
    assert_eq!(deleted.playlist_ids, vec![playlist_id.clone()]);

    // No cascade to playlists
    assert!(lumen_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .is_some());

    let again = lumen_storage::monitors::delete(pool, &monitor_id).await.unwrap();
    assert!(again.is_none());
}

#[tokio::test]
async fn test_resolved_monitors_join_playlists_and_media() {
    let test_db = TestDb::new().await;
    let storage = LocalStorageContext::new(test_db.pool().clone());

    let lobby = storage
        .create_playlist(CreatePlaylist {
            name: "Lobby".to_string(),
        })
        .await
        .unwrap();
    let other = storage
        .create_playlist(CreatePlaylist {
            name: "Other".to_string(),
        })
        .await
        .unwrap();
    storage
        .append_media(&lobby.id, vec![new_media("a.png"), new_media("b.png")])
        .await
        .unwrap();

    let screen = storage
        .create_monitor(CreateMonitor {
            name: "Lobby Screen".to_string(),
        })
        .await
        .unwrap();
    let idle = storage
        .create_monitor(CreateMonitor {
            name: "Idle".to_string(),
        })
        .await
        .unwrap();
    storage.link_playlist(&screen.id, &lobby.id).await.unwrap();
    storage.link_playlist(&screen.id, &other.id).await.unwrap();

    let resolved = storage.get_resolved_monitors().await.unwrap();
    assert_eq!(resolved.len(), 2);

    let first = &resolved[0];
    assert_eq!(first.id, screen.id);
    let playlist_names: Vec<&str> = first.playlists.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(playlist_names, vec!["Lobby", "Other"]);
    let media_names: Vec<&str> = first.playlists[0]
        .media_items
        .iter()
        .map(|m| m.display_name.as_str())
        .collect();
    assert_eq!(media_names, vec!["a.png", "b.png"]);

    assert_eq!(resolved[1].id, idle.id);
    assert!(resolved[1].playlists.is_empty());

    let single = storage
        .get_resolved_monitor(&screen.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&single, first);
}

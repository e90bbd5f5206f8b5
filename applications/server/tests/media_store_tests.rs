/// Media store integration tests
use lumen_server::{services::MediaStore, ServerError};
use tempfile::TempDir;

fn create_store() -> (MediaStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = MediaStore::new(temp_dir.path().join("uploads"), "/uploads");
    (store, temp_dir)
}

#[tokio::test]
async fn test_initialize_creates_directory() {
    let (store, _temp_dir) = create_store();
    assert!(!store.base_path().exists());

    store.initialize().await.unwrap();
    assert!(store.base_path().is_dir());

    // Idempotent
    store.initialize().await.unwrap();
}

#[tokio::test]
async fn test_same_name_never_overwrites() {
    let (store, _temp_dir) = create_store();
    store.initialize().await.unwrap();

    let first = store.save("a.png", b"first").await.unwrap();
    let second = store.save("a.png", b"second").await.unwrap();

    assert_ne!(first.location, second.location);
    assert_eq!(std::fs::read(&first.path).unwrap(), b"first");
    assert_eq!(std::fs::read(&second.path).unwrap(), b"second");
}

#[tokio::test]
async fn test_concurrent_saves_get_distinct_files() {
    let (store, _temp_dir) = create_store();
    store.initialize().await.unwrap();
    let store = std::sync::Arc::new(store);

    let mut handles = Vec::new();
    for i in 0..16u8 {
        let store = std::sync::Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.save("frame.jpg", &[i]).await.unwrap()
        }));
    }

    let mut locations = std::collections::HashSet::new();
    for handle in handles {
        let stored = handle.await.unwrap();
        assert!(stored.path.exists());
        locations.insert(stored.location);
    }
    assert_eq!(locations.len(), 16);
}

#[tokio::test]
async fn test_original_name_cannot_escape_directory() {
    let (store, temp_dir) = create_store();
    store.initialize().await.unwrap();

    let stored = store.save("../../etc/passwd.txt", b"data").await.unwrap();
    assert!(stored.path.starts_with(store.base_path()));
    assert!(stored.location.ends_with(".txt"));
    assert!(!temp_dir.path().join("etc").exists());
}

#[test]
fn test_resolve_rejects_traversal() {
    let (store, _temp_dir) = create_store();

    for location in [
        "/uploads/../secret",
        "/uploads/nested/file.png",
        "/uploads/",
        "/elsewhere/file.png",
        "/uploadsfile.png",
        "/uploads/..\\secret",
    ] {
        assert!(
            matches!(store.resolve(location), Err(ServerError::BadRequest(_))),
            "{} should be rejected",
            location
        );
    }

    assert_eq!(
        store.resolve("/uploads/file.png").unwrap(),
        store.base_path().join("file.png")
    );
}

#[tokio::test]
async fn test_delete_missing_file() {
    let (store, _temp_dir) = create_store();
    store.initialize().await.unwrap();

    assert!(!store.delete("/uploads/never-stored.png").await.unwrap());
}

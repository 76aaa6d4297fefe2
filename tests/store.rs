//! Integration tests for snapshot persistence.

mod common;

use common::{rng, tournament};
use worlds_swiss_sim::models::SNAPSHOT_VERSION;
use worlds_swiss_sim::{advance, SnapshotStore, Tournament};

fn temp_store() -> SnapshotStore {
    let dir = std::env::temp_dir().join(format!("worlds-swiss-sim-{}", uuid::Uuid::new_v4()));
    SnapshotStore::new(dir)
}

#[tokio::test]
async fn saved_snapshot_loads_back() {
    let store = temp_store();
    let t = advance(&tournament(), &mut rng(1)).unwrap();
    store.save(&t).await.unwrap();

    let loaded: Tournament = store.load(t.id).await.unwrap().unwrap();
    assert_eq!(loaded.id, t.id);
    assert_eq!(loaded.matches, t.matches);
    assert_eq!(loaded.phase(), t.phase());

    store.clear(t.id).await.unwrap();
    assert!(store.load(t.id).await.unwrap().is_none());
    store.clear(t.id).await.unwrap();
    let _ = tokio::fs::remove_dir_all(store.dir()).await;
}

#[tokio::test]
async fn other_versions_and_garbage_count_as_absent() {
    let store = temp_store();
    let mut t = tournament();
    t.version = "0.9.0".to_string();
    assert_ne!(t.version, SNAPSHOT_VERSION);
    store.save(&t).await.unwrap();

    let path = store.dir().join(format!("{}.json", t.id));
    assert!(path.exists());
    assert!(store.load(t.id).await.unwrap().is_none());
    assert!(!path.exists());

    tokio::fs::write(&path, b"{ not json").await.unwrap();
    assert!(store.load(t.id).await.unwrap().is_none());
    assert!(!path.exists());
    let _ = tokio::fs::remove_dir_all(store.dir()).await;
}

//! Integration tests for the live tournament registry: restore from snapshots, ordered writes, eviction.

mod common;

use common::{rng, tournament};
use std::sync::Arc;
use std::time::Duration;
use worlds_swiss_sim::{
    advance, full_reset, set_outcome_strategy, OutcomeStrategyKind, ServiceError, SnapshotStore,
    StageType, Tournament, TournamentError, TournamentService,
};

fn temp_store() -> SnapshotStore {
    let dir = std::env::temp_dir().join(format!("worlds-swiss-sim-{}", uuid::Uuid::new_v4()));
    SnapshotStore::new(dir)
}

#[tokio::test]
async fn operations_restore_tournaments_that_are_only_on_disk() {
    let store = temp_store();
    let started = advance(&tournament(), &mut rng(3)).unwrap();
    store.save(&started).await.unwrap();

    // Fresh service, as after a restart: nothing in memory.
    let service = TournamentService::new(store.clone());
    assert!(!service.is_loaded(started.id));

    let reset = service.apply(started.id, full_reset).await.unwrap();
    assert_eq!(reset.id, started.id);
    assert!(reset.matches.is_empty());
    assert!(service.is_loaded(started.id));

    let on_disk = store.load(started.id).await.unwrap().unwrap();
    assert_eq!(on_disk.matches, reset.matches);
    assert_eq!(on_disk.updated_at, reset.updated_at);

    let advanced = service
        .apply(started.id, |t| advance(t, &mut rng(4)))
        .await
        .unwrap();
    assert_eq!(advanced.round_matches(StageType::Swiss, 1).len(), 8);
    let _ = tokio::fs::remove_dir_all(store.dir()).await;
}

#[tokio::test]
async fn evicted_tournaments_come_back_from_their_snapshot() {
    let store = temp_store();
    let service = TournamentService::new(store.clone());
    let created = service.insert(tournament()).await.unwrap();
    let advanced = service
        .apply(created.id, |t| advance(t, &mut rng(5)))
        .await
        .unwrap();

    assert_eq!(service.evict_idle(Duration::from_secs(3600)).unwrap(), 0);
    assert_eq!(service.evict_idle(Duration::ZERO).unwrap(), 1);
    assert!(!service.is_loaded(created.id));

    let restored = service.get(created.id).await.unwrap();
    assert_eq!(restored.matches, advanced.matches);
    assert!(service.is_loaded(created.id));
    let _ = tokio::fs::remove_dir_all(store.dir()).await;
}

#[tokio::test]
async fn unknown_tournament_is_not_found() {
    let store = temp_store();
    let service = TournamentService::new(store.clone());
    let id = uuid::Uuid::new_v4();
    match service.apply(id, full_reset).await {
        Err(ServiceError::NotFound(missing)) => assert_eq!(missing, id),
        other => panic!("expected NotFound, got {:?}", other.map(|t| t.id)),
    }
    assert!(store.load(id).await.unwrap().is_none());
}

#[tokio::test]
async fn rejected_operation_leaves_memory_and_disk_alone() {
    let store = temp_store();
    let service = TournamentService::new(store.clone());
    let created = service.insert(tournament()).await.unwrap();

    let result = service
        .apply(created.id, |_| Err(TournamentError::NoAnchorRound))
        .await;
    assert!(matches!(
        result,
        Err(ServiceError::Rejected(TournamentError::NoAnchorRound))
    ));

    let in_memory = service.get(created.id).await.unwrap();
    let on_disk = store.load(created.id).await.unwrap().unwrap();
    assert_eq!(in_memory.updated_at, created.updated_at);
    assert_eq!(on_disk.updated_at, created.updated_at);
    let _ = tokio::fs::remove_dir_all(store.dir()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writes_leave_the_latest_snapshot_on_disk() {
    let store = temp_store();
    let service = Arc::new(TournamentService::new(store.clone()));
    let id = service.insert(tournament()).await.unwrap().id;

    let mut handles = Vec::new();
    for i in 0..24 {
        let service = Arc::clone(&service);
        let kind = if i % 2 == 0 {
            OutcomeStrategyKind::RegionWeighted
        } else {
            OutcomeStrategyKind::Uniform
        };
        handles.push(tokio::spawn(async move {
            service
                .apply(id, move |t| Ok(set_outcome_strategy(t, kind)))
                .await
                .map(|t| t.updated_at)
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let in_memory: Tournament = service.get(id).await.unwrap();
    let on_disk = store.load(id).await.unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&on_disk).unwrap(),
        serde_json::to_value(&in_memory).unwrap()
    );
    let _ = tokio::fs::remove_dir_all(store.dir()).await;
}

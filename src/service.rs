//! Live tournaments kept in memory and backed by the snapshot store.
//!
//! Every change to a tournament goes through [`TournamentService::apply`]. A tournament
//! that is not in memory (evicted, or the server restarted) is restored from its
//! snapshot before the operation runs.

use crate::loader::LoadError;
use crate::models::{Tournament, TournamentError, TournamentId};
use crate::store::SnapshotStore;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Why a service call produced no tournament.
#[derive(Debug)]
pub enum ServiceError {
    /// Neither in memory nor in the store.
    NotFound(TournamentId),
    /// The engine refused the operation; the tournament is unchanged.
    Rejected(TournamentError),
    Storage(LoadError),
    /// A request panicked while holding the registry lock.
    Poisoned,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(id) => write!(f, "No tournament {}", id),
            ServiceError::Rejected(e) => write!(f, "{}", e),
            ServiceError::Storage(e) => write!(f, "Snapshot storage failed: {}", e),
            ServiceError::Poisoned => write!(f, "Tournament registry lock poisoned"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Rejected(e) => Some(e),
            ServiceError::Storage(e) => Some(e),
            ServiceError::NotFound(_) | ServiceError::Poisoned => None,
        }
    }
}

impl From<TournamentError> for ServiceError {
    fn from(e: TournamentError) -> Self {
        ServiceError::Rejected(e)
    }
}

impl From<LoadError> for ServiceError {
    fn from(e: LoadError) -> Self {
        ServiceError::Storage(e)
    }
}

/// Current snapshot and last access time (for eviction).
struct Entry {
    tournament: Tournament,
    last_activity: Instant,
}

impl Entry {
    fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            last_activity: Instant::now(),
        }
    }
}

/// Tournaments by id. Each entry has its own async lock, held from reading the
/// snapshot until the new one is on disk, so writes for one tournament never overtake
/// each other.
pub struct TournamentService {
    entries: RwLock<HashMap<TournamentId, Arc<Mutex<Entry>>>>,
    store: SnapshotStore,
}

impl TournamentService {
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            store,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Whether the tournament is currently held in memory.
    pub fn is_loaded(&self, id: TournamentId) -> bool {
        self.entries
            .read()
            .map(|g| g.contains_key(&id))
            .unwrap_or(false)
    }

    fn cached(&self, id: TournamentId) -> Result<Option<Arc<Mutex<Entry>>>, ServiceError> {
        let g = self.entries.read().map_err(|_| ServiceError::Poisoned)?;
        Ok(g.get(&id).cloned())
    }

    /// The in-memory entry, restored from the store when missing.
    async fn entry(&self, id: TournamentId) -> Result<Arc<Mutex<Entry>>, ServiceError> {
        if let Some(entry) = self.cached(id)? {
            return Ok(entry);
        }
        let tournament = self
            .store
            .load(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        log::info!("Restored tournament {} from {}", id, self.store.dir().display());
        let mut g = self.entries.write().map_err(|_| ServiceError::Poisoned)?;
        // A concurrent request may have restored it first; keep that one.
        let entry = g
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(Entry::new(tournament))));
        Ok(Arc::clone(entry))
    }

    async fn persist(&self, tournament: &Tournament) {
        if let Err(e) = self.store.save(tournament).await {
            log::error!("Failed to persist tournament {}: {}", tournament.id, e);
        }
    }

    /// Register a new tournament and write its first snapshot.
    pub async fn insert(&self, tournament: Tournament) -> Result<Tournament, ServiceError> {
        let entry = Arc::new(Mutex::new(Entry::new(tournament.clone())));
        let guard = entry.lock().await;
        {
            let mut g = self.entries.write().map_err(|_| ServiceError::Poisoned)?;
            g.insert(tournament.id, Arc::clone(&entry));
        }
        self.persist(&tournament).await;
        drop(guard);
        log::info!("Created tournament {}", tournament.id);
        Ok(tournament)
    }

    pub async fn get(&self, id: TournamentId) -> Result<Tournament, ServiceError> {
        let entry = self.entry(id).await?;
        let mut e = entry.lock().await;
        e.last_activity = Instant::now();
        Ok(e.tournament.clone())
    }

    /// Run one engine operation on the current snapshot. The entry is replaced and
    /// saved only when the operation succeeds.
    pub async fn apply<F>(&self, id: TournamentId, op: F) -> Result<Tournament, ServiceError>
    where
        F: FnOnce(&Tournament) -> Result<Tournament, TournamentError>,
    {
        let entry = self.entry(id).await?;
        let mut e = entry.lock().await;
        e.last_activity = Instant::now();
        let next = op(&e.tournament).map_err(|err| {
            log::warn!("Tournament {}: {}", id, err);
            err
        })?;
        self.persist(&next).await;
        e.tournament = next.clone();
        Ok(next)
    }

    /// Drop tournaments idle for at least `timeout` from memory. Their snapshots stay in
    /// the store. Entries busy with a request are kept. Returns how many were dropped.
    pub fn evict_idle(&self, timeout: Duration) -> Result<usize, ServiceError> {
        let mut g = self.entries.write().map_err(|_| ServiceError::Poisoned)?;
        let before = g.len();
        g.retain(|_, entry| match entry.try_lock() {
            Ok(e) => e.last_activity.elapsed() < timeout,
            Err(_) => true,
        });
        Ok(before - g.len())
    }
}

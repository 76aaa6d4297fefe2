//! Snapshot persistence: one pretty JSON file per tournament.

use crate::loader::LoadError;
use crate::models::{Tournament, TournamentId, SNAPSHOT_VERSION};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores tournaments as `<dir>/<id>.json`.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: TournamentId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Write the snapshot, replacing any previous one. The file is written next to
    /// its target and renamed over it.
    pub async fn save(&self, tournament: &Tournament) -> Result<(), LoadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_vec_pretty(tournament)?;
        let path = self.path_for(tournament.id);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        log::debug!("Saved tournament {} to {}", tournament.id, path.display());
        Ok(())
    }

    /// Read a stored snapshot. Missing, unreadable JSON or another schema version
    /// all count as "no snapshot"; a stale file is removed.
    pub async fn load(&self, id: TournamentId) -> Result<Option<Tournament>, LoadError> {
        let path = self.path_for(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let tournament: Tournament = match serde_json::from_slice(&bytes) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Discarding unreadable snapshot {}: {}", path.display(), e);
                self.clear(id).await?;
                return Ok(None);
            }
        };
        if tournament.version != SNAPSHOT_VERSION {
            log::warn!(
                "Discarding snapshot {} with version {} (expected {})",
                path.display(),
                tournament.version,
                SNAPSHOT_VERSION
            );
            self.clear(id).await?;
            return Ok(None);
        }
        Ok(Some(tournament))
    }

    /// Remove a stored snapshot. Removing one that does not exist is fine.
    pub async fn clear(&self, id: TournamentId) -> Result<(), LoadError> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

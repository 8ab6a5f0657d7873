//! Session persistence seam.
//!
//! The facade saves a [`SavedSession`] after every accepted transition so a
//! quit or crash resumes mid-turn. Stores speak JSON and report failures as
//! `String` so callers can treat a broken save file as "no save" without
//! special-casing the error type.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ramino_engine::state::GameState;

use crate::io_utils::ensure_parent_dir;

/// Snapshot written to disk: the full game state plus what is needed to
/// rebuild the engine around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    /// RFC3339 timestamp of the save
    pub saved_at: String,
    /// RNG seed the session was created with
    pub seed: u64,
    /// The complete game state
    pub state: GameState,
}

/// Where session snapshots live. File-backed in the real CLI, in-memory in
/// tests.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<SavedSession>, String>;
    fn save(&mut self, session: &SavedSession) -> Result<(), String>;
    fn clear(&mut self) -> Result<(), String>;
}

/// JSON file store at a fixed path.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<SavedSession>, String> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| e.to_string())?;
        let session = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
        Ok(Some(session))
    }

    fn save(&mut self, session: &SavedSession) -> Result<(), String> {
        ensure_parent_dir(&self.path)?;
        let raw = serde_json::to_string(session).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, raw).map_err(|e| e.to_string())
    }

    fn clear(&mut self) -> Result<(), String> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    slot: Option<SavedSession>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<SavedSession>, String> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, session: &SavedSession) -> Result<(), String> {
        self.slot = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), String> {
        self.slot = None;
        Ok(())
    }
}

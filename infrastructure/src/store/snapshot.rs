//! JSON snapshot persistence for [`GateState`]
//!
//! The whole state is read once at startup and written back after a command.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous snapshot intact.
//!
//! Concurrent commands against the same snapshot are serialized through an
//! exclusive lock on a sibling `<file>.lock`. Hold a [`SnapshotLock`] from
//! [`SnapshotFile::load`] until [`SnapshotFile::save`] returns, otherwise the
//! later writer silently drops the earlier one's changes.

use super::state::GateState;
use estate_quorum_application::StoreError;
use fs4::fs_std::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot {path} is not valid: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read the store for a snapshot: {0}")]
    Store(#[from] StoreError),
}

/// Exclusive hold on a snapshot. Released on drop.
#[derive(Debug)]
pub struct SnapshotLock {
    _file: File,
    path: PathBuf,
}

impl SnapshotLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A state snapshot at a fixed path
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the lock file next to the snapshot
    pub fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    /// Block until this process holds the snapshot exclusively.
    pub fn lock(&self) -> Result<SnapshotLock, SnapshotError> {
        self.ensure_parent()?;
        let path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| self.io_error(e))?;
        FileExt::lock_exclusive(&file).map_err(|e| self.io_error(e))?;

        debug!("Holding snapshot lock {}", path.display());
        Ok(SnapshotLock { _file: file, path })
    }

    /// Read the snapshot; a missing file is an empty state
    pub fn load(&self) -> Result<GateState, SnapshotError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", self.path.display());
                return Ok(GateState::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_str(&content).map_err(|source| SnapshotError::Format {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, state: &GateState) -> Result<(), SnapshotError> {
        self.ensure_parent()?;

        let json = serde_json::to_string_pretty(state).map_err(|source| SnapshotError::Format {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.sibling(".tmp");
        let mut file = fs::File::create(&tmp).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        debug!("Snapshot written to {}", self.path.display());
        Ok(())
    }

    fn ensure_parent(&self) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        Ok(())
    }

    /// `state.json` + `.lock` -> `state.json.lock`
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("state"));
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LoanRecord;
    use estate_quorum_domain::LoanId;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_missing_file_loads_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("state.json"));
        assert_eq!(snapshot.load().unwrap(), GateState::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("nested").join("state.json"));

        let mut state = GateState::default();
        state.loans.insert(LoanId(4), LoanRecord::new(LoanId(4), 1_200_000));
        snapshot.save(&state).unwrap();

        assert_eq!(snapshot.load().unwrap(), state);
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SnapshotFile::new(&path).load().unwrap_err();
        assert!(matches!(err, SnapshotError::Format { .. }));
    }

    #[test]
    fn test_lock_file_sits_next_to_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("data").join("state.json"));

        let lock = snapshot.lock().unwrap();
        assert_eq!(lock.path(), dir.path().join("data").join("state.json.lock"));
        assert!(lock.path().exists());
    }

    #[test]
    fn test_lock_is_exclusive_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let released = Arc::new(AtomicBool::new(false));
        let (locked_tx, locked_rx) = mpsc::channel();

        let holder = {
            let path = path.clone();
            let released = released.clone();
            thread::spawn(move || {
                let lock = SnapshotFile::new(&path).lock().unwrap();
                locked_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(150));
                released.store(true, Ordering::SeqCst);
                drop(lock);
            })
        };

        locked_rx.recv().unwrap();
        let _lock = SnapshotFile::new(&path).lock().unwrap();
        assert!(released.load(Ordering::SeqCst));
        holder.join().unwrap();
    }

    #[test]
    fn test_temp_file_keeps_the_snapshot_name() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("gates.dat"));
        snapshot.save(&GateState::default()).unwrap();

        assert!(dir.path().join("gates.dat").exists());
        assert!(!dir.path().join("gates.dat.tmp").exists());
        assert!(!dir.path().join("gates.json.tmp").exists());
    }
}

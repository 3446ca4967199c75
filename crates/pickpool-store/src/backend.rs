//! Backing resources for the win-count snapshot.
//!
//! The store talks to its snapshot only through [`SnapshotBackend`], so it
//! can run against a JSON file ([`FileBackend`]) in production and an
//! in-memory fake ([`MemoryBackend`]) in tests.
//!
//! # Write atomicity
//!
//! [`FileBackend::write`] serializes to a uniquely named sibling file and
//! renames it over the target. A failed or interrupted write therefore
//! leaves the previous snapshot intact; at worst a stray temp file remains.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pickpool_types::WinSnapshot;

use crate::error::StoreError;

/// A place the full win-count snapshot can be read from and written to.
pub trait SnapshotBackend: Send + Sync {
    /// Human-readable description used in logs and errors.
    fn describe(&self) -> String;

    /// Read the snapshot. `Ok(None)` means the resource does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] if the resource exists but
    /// cannot be read or parsed.
    fn read(&self) -> Result<Option<WinSnapshot>, StoreError>;

    /// Replace the snapshot as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] if the write fails. The
    /// previous snapshot must be left intact in that case.
    fn write(&self, snapshot: &WinSnapshot) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// File backend
// ---------------------------------------------------------------------------

/// Snapshot stored as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend for the file at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp path used for the write-then-rename.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| String::from("snapshot"), |n| n.to_string_lossy().into_owned());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple()))
    }
}

/// Parse a snapshot document.
///
/// # Errors
///
/// Returns [`StoreError::StorageUnavailable`] if `contents` is not a valid
/// snapshot document.
pub fn parse_snapshot(contents: &str, location: &str) -> Result<WinSnapshot, StoreError> {
    serde_json::from_str(contents)
        .map_err(|e| StoreError::unavailable(location, format!("malformed snapshot: {e}")))
}

impl SnapshotBackend for FileBackend {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<WinSnapshot>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::unavailable(self.describe(), e)),
        };
        parse_snapshot(&contents, &self.describe()).map(Some)
    }

    fn write(&self, snapshot: &WinSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| StoreError::unavailable(self.describe(), e))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::unavailable(self.describe(), e))?;
        }

        let temp = self.temp_path();
        if let Err(e) = std::fs::write(&temp, json) {
            // Best effort; the target file has not been touched.
            let _ = std::fs::remove_file(&temp);
            return Err(StoreError::unavailable(self.describe(), e));
        }
        if let Err(e) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(StoreError::unavailable(self.describe(), e));
        }

        tracing::debug!(path = %self.path.display(), records = snapshot.teams.len(), "Snapshot written");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Snapshot held in memory. Used by tests and as an injectable fake.
///
/// Failure switches let tests exercise the storage-unavailable paths.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    snapshot: Mutex<Option<WinSnapshot>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryBackend {
    /// An empty backend (the snapshot does not exist yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `snapshot`.
    pub fn with_snapshot(snapshot: WinSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Make every subsequent read fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of the current snapshot, bypassing the failure switches.
    pub fn peek(&self) -> Option<WinSnapshot> {
        self.snapshot.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SnapshotBackend for MemoryBackend {
    fn describe(&self) -> String {
        String::from("memory")
    }

    fn read(&self) -> Result<Option<WinSnapshot>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(self.describe(), "read failure injected"));
        }
        let guard = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::unavailable(self.describe(), e))?;
        Ok(guard.clone())
    }

    fn write(&self, snapshot: &WinSnapshot) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(self.describe(), "write failure injected"));
        }
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::unavailable(self.describe(), e))?;
        *guard = Some(snapshot.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

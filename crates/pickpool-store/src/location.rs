//! Storage-location strategy.
//!
//! Where the snapshot lives is a deployment decision made once at startup,
//! not a business rule. Long-lived hosts keep it in a project-local
//! directory that survives restarts. Hosts that only allow writes to a
//! scoped temporary directory keep it there and accept that it is lost on
//! redeploy (the next start re-bootstraps it).

use std::path::{Path, PathBuf};

/// File name used when none is configured.
pub const DEFAULT_FILE_NAME: &str = "teamData.json";

/// Which writable area holds the win-count snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// Project-local directory that persists across restarts.
    Persistent {
        /// Directory holding the snapshot file.
        dir: PathBuf,
    },
    /// Per-instance temporary directory; state does not survive redeploys.
    Ephemeral {
        /// Directory holding the snapshot file.
        dir: PathBuf,
    },
}

impl StorageLocation {
    /// Persistent storage rooted at `dir`.
    pub fn persistent(dir: impl Into<PathBuf>) -> Self {
        Self::Persistent { dir: dir.into() }
    }

    /// Ephemeral storage rooted at `dir`.
    pub fn ephemeral(dir: impl Into<PathBuf>) -> Self {
        Self::Ephemeral { dir: dir.into() }
    }

    /// Ephemeral storage in the operating system's temp directory.
    pub fn system_temp() -> Self {
        Self::Ephemeral {
            dir: std::env::temp_dir(),
        }
    }

    /// The directory holding the snapshot.
    pub fn dir(&self) -> &Path {
        match self {
            Self::Persistent { dir } | Self::Ephemeral { dir } => dir,
        }
    }

    /// Full path of the snapshot file named `file_name`.
    pub fn snapshot_path(&self, file_name: &str) -> PathBuf {
        self.dir().join(file_name)
    }

    /// Short label for logs and health output.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Persistent { .. } => "persistent",
            Self::Ephemeral { .. } => "ephemeral",
        }
    }
}

impl core::fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.kind(), self.dir().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_path_joins_file_name() {
        let location = StorageLocation::persistent("data");
        assert_eq!(
            location.snapshot_path(DEFAULT_FILE_NAME),
            Path::new("data").join("teamData.json")
        );
        assert_eq!(location.kind(), "persistent");
    }

    #[test]
    fn system_temp_is_ephemeral() {
        let location = StorageLocation::system_temp();
        assert_eq!(location.kind(), "ephemeral");
        assert_eq!(location.dir(), std::env::temp_dir().as_path());
    }
}

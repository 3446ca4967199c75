//! The win-count store: a durable overlay of team wins.
//!
//! [`WinCountStore`] owns one backing snapshot, chosen once at startup. It
//! offers a read-all and a point update (plus a batched variant), both
//! implemented as whole-snapshot reads and writes.
//!
//! # Concurrency
//!
//! The store does no locking of its own. Two concurrent updates interleave
//! as read-modify-write over the full snapshot and the later write wins.
//! Callers that need serialized updates must provide it themselves, and a
//! multi-team change that must land atomically belongs in one
//! [`WinCountStore::update_many`] call.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use pickpool_registry::TeamRegistry;
use pickpool_types::{TeamId, WinCounts, WinSnapshot};

use crate::backend::{FileBackend, SnapshotBackend};
use crate::bootstrap::BootstrapChain;
use crate::error::StoreError;
use crate::location::StorageLocation;

/// Durable team id to win count mapping backed by a single snapshot.
pub struct WinCountStore {
    registry: Arc<TeamRegistry>,
    backend: Box<dyn SnapshotBackend>,
    bootstrap: BootstrapChain,
}

impl core::fmt::Debug for WinCountStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WinCountStore")
            .field("backend", &self.backend.describe())
            .field("bootstrap", &self.bootstrap)
            .finish_non_exhaustive()
    }
}

impl WinCountStore {
    /// Assemble a store from an arbitrary backend and bootstrap chain.
    pub fn new(
        registry: Arc<TeamRegistry>,
        backend: impl SnapshotBackend + 'static,
        bootstrap: BootstrapChain,
    ) -> Self {
        Self {
            registry,
            backend: Box::new(backend),
            bootstrap,
        }
    }

    /// A file-backed store at `location`/`file_name`.
    ///
    /// When `bundled` is given, a missing snapshot is first seeded from that
    /// file; otherwise (or if it is unusable) from the catalog defaults.
    pub fn open(
        registry: Arc<TeamRegistry>,
        location: &StorageLocation,
        file_name: &str,
        bundled: Option<PathBuf>,
    ) -> Self {
        let path = location.snapshot_path(file_name);
        let bootstrap = match bundled {
            // A bundle pointing at the target itself adds nothing: if it
            // existed there would be no bootstrap.
            Some(bundle) if bundle != path => BootstrapChain::with_bundled(&registry, bundle),
            _ => BootstrapChain::defaults_only(&registry),
        };
        tracing::info!(
            location = %location,
            path = %path.display(),
            "Win-count store opened"
        );
        Self::new(registry, FileBackend::new(path), bootstrap)
    }

    /// Description of the backing resource.
    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// The catalog this store validates against.
    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    // -------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------

    /// Read the snapshot, bootstrapping and persisting one if it is missing.
    ///
    /// An existing snapshot is never overwritten here, so repeated calls are
    /// idempotent.
    fn read_or_bootstrap(&self) -> Result<WinSnapshot, StoreError> {
        if let Some(snapshot) = self.backend.read()? {
            return Ok(snapshot);
        }

        tracing::info!(target_path = %self.backend.describe(), "Snapshot not found, bootstrapping");
        let (mut snapshot, source) = self.bootstrap.run();
        snapshot.updated_at = Some(Utc::now());
        self.backend.write(&snapshot)?;
        tracing::info!(
            source,
            records = snapshot.teams.len(),
            target_path = %self.backend.describe(),
            "Snapshot bootstrapped"
        );
        Ok(snapshot)
    }

    /// Overlay a snapshot on the catalog defaults.
    ///
    /// Snapshot records for teams the catalog does not know are ignored.
    /// Duplicate records resolve to the first, as in [`WinSnapshot::to_counts`].
    fn merge_with_defaults(&self, snapshot: &WinSnapshot) -> WinCounts {
        let mut counts = self.registry.default_wins();
        for (id, wins) in snapshot.to_counts() {
            if let Some(slot) = counts.get_mut(&id) {
                *slot = wins;
            } else {
                tracing::debug!(team = %id, "Ignoring snapshot record for unknown team");
            }
        }
        counts
    }

    /// Load every team's current win count, failing on storage errors.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] if the snapshot cannot be
    /// read, parsed, or (on first run) persisted.
    pub fn try_load_all(&self) -> Result<WinCounts, StoreError> {
        let snapshot = self.read_or_bootstrap()?;
        Ok(self.merge_with_defaults(&snapshot))
    }

    /// Load every team's current win count.
    ///
    /// The read path degrades instead of failing: if the snapshot cannot be
    /// loaded at all, the catalog defaults are returned and a warning is
    /// logged.
    pub fn load_all(&self) -> WinCounts {
        match self.try_load_all() {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!(error = %e, "Win counts unavailable, serving catalog defaults");
                self.registry.default_wins()
            }
        }
    }

    // -------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------

    /// Check an update request before any I/O happens.
    fn validate(&self, team: TeamId, wins: i64) -> Result<u32, StoreError> {
        if !self.registry.contains(team) {
            return Err(StoreError::NotFound(team));
        }
        if wins < 0 {
            return Err(StoreError::InvalidArgument {
                team,
                wins,
                reason: "win count must not be negative",
            });
        }
        match u32::try_from(wins) {
            Ok(wins) => Ok(wins),
            Err(_) => Err(StoreError::InvalidArgument {
                team,
                wins,
                reason: "win count is too large",
            }),
        }
    }

    /// Set one team's win count and return its previous value.
    ///
    /// The previous value is the snapshot's record, or the catalog default
    /// if the snapshot held none.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown team and
    /// [`StoreError::InvalidArgument`] for a negative or oversized count,
    /// both without touching storage. Returns
    /// [`StoreError::StorageUnavailable`] if the snapshot cannot be read or
    /// written; the previous snapshot stays intact.
    pub fn update_one(&self, team: TeamId, wins: i64) -> Result<u32, StoreError> {
        let wins = self.validate(team, wins)?;

        let mut snapshot = self.read_or_bootstrap()?;
        let previous = self.apply(&mut snapshot, team, wins);
        snapshot.updated_at = Some(Utc::now());
        self.backend.write(&snapshot)?;

        tracing::info!(team = %team, previous, wins, "Team wins updated");
        Ok(previous)
    }

    /// Set several teams' win counts in a single snapshot write.
    ///
    /// Every entry is validated before anything is read or written, so
    /// either all updates land or none do. Returns `(team, previous)` pairs
    /// in input order. A team listed twice ends with its last value.
    ///
    /// # Errors
    ///
    /// Same as [`WinCountStore::update_one`], for the first offending entry.
    pub fn update_many(&self, updates: &[(TeamId, i64)]) -> Result<Vec<(TeamId, u32)>, StoreError> {
        let validated = updates
            .iter()
            .map(|&(team, wins)| self.validate(team, wins).map(|wins| (team, wins)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut snapshot = self.read_or_bootstrap()?;
        let previous: Vec<(TeamId, u32)> = validated
            .iter()
            .map(|&(team, wins)| (team, self.apply(&mut snapshot, team, wins)))
            .collect();
        snapshot.updated_at = Some(Utc::now());
        self.backend.write(&snapshot)?;

        tracing::info!(count = previous.len(), "Team wins updated in batch");
        Ok(previous)
    }

    /// Upsert one record, returning the value it replaced.
    fn apply(&self, snapshot: &mut WinSnapshot, team: TeamId, wins: u32) -> u32 {
        snapshot
            .upsert(team, wins)
            .unwrap_or_else(|| self.registry.get_team(team).map_or(0, |t| t.wins))
    }
}

//! First-run bootstrap of the win-count snapshot.
//!
//! When the backing snapshot does not exist, the store asks an ordered
//! list of [`SnapshotProvider`]s for an initial one. Each provider either
//! produces a snapshot or declines; the chain always ends with
//! [`RegistryDefaults`], which never declines.

use std::path::PathBuf;

use pickpool_registry::TeamRegistry;
use pickpool_types::{WinCounts, WinSnapshot};

use crate::backend::parse_snapshot;

/// A source of an initial snapshot.
pub trait SnapshotProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Produce a snapshot, or `None` to let the next provider try.
    fn provide(&self) -> Option<WinSnapshot>;
}

/// A pre-seeded snapshot file shipped with the application bundle.
///
/// Declines if the file is missing or unreadable; an unreadable bundle is
/// logged at `warn` because it means the shipped data is broken.
#[derive(Debug, Clone)]
pub struct BundledSnapshot {
    path: PathBuf,
}

impl BundledSnapshot {
    /// Provider reading the bundled snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotProvider for BundledSnapshot {
    fn name(&self) -> &'static str {
        "bundled"
    }

    fn provide(&self) -> Option<WinSnapshot> {
        let location = self.path.display().to_string();
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %location, "No bundled snapshot");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %location, error = %e, "Bundled snapshot unreadable, using defaults");
                return None;
            }
        };
        match parse_snapshot(&contents, &location) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(path = %location, error = %e, "Bundled snapshot malformed, using defaults");
                None
            }
        }
    }
}

/// Snapshot synthesized from the catalog's default win counts.
#[derive(Debug, Clone)]
pub struct RegistryDefaults {
    counts: WinCounts,
}

impl RegistryDefaults {
    /// Capture the default win counts of `registry`.
    pub fn new(registry: &TeamRegistry) -> Self {
        Self {
            counts: registry.default_wins(),
        }
    }

    /// The guaranteed snapshot.
    pub fn snapshot(&self) -> WinSnapshot {
        WinSnapshot::from_counts(&self.counts)
    }
}

impl SnapshotProvider for RegistryDefaults {
    fn name(&self) -> &'static str {
        "defaults"
    }

    fn provide(&self) -> Option<WinSnapshot> {
        Some(self.snapshot())
    }
}

/// Ordered providers terminated by the catalog defaults.
pub struct BootstrapChain {
    providers: Vec<Box<dyn SnapshotProvider>>,
    fallback: RegistryDefaults,
}

impl core::fmt::Debug for BootstrapChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("BootstrapChain")
            .field("providers", &names)
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl BootstrapChain {
    /// A chain with only the catalog defaults.
    pub fn defaults_only(registry: &TeamRegistry) -> Self {
        Self {
            providers: Vec::new(),
            fallback: RegistryDefaults::new(registry),
        }
    }

    /// Bundled snapshot at `path`, then catalog defaults.
    pub fn with_bundled(registry: &TeamRegistry, path: impl Into<PathBuf>) -> Self {
        Self::defaults_only(registry).push(BundledSnapshot::new(path))
    }

    /// Append a provider ahead of the final fallback.
    #[must_use]
    pub fn push(mut self, provider: impl SnapshotProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Run the chain. Always yields a snapshot and the name of the
    /// provider that produced it.
    pub fn run(&self) -> (WinSnapshot, &'static str) {
        for provider in &self.providers {
            if let Some(snapshot) = provider.provide() {
                return (snapshot, provider.name());
            }
        }
        (self.fallback.snapshot(), self.fallback.name())
    }
}

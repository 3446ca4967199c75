//! Durable win-count store for the pick pool.
//!
//! The store is the mutable half of a read-through overlay: the team
//! catalog in `pickpool-registry` is immutable, and this crate persists
//! only `(team, wins)` pairs on top of it.
//!
//! # Architecture
//!
//! ```text
//! WinCountStore
//!     |
//!     +-- SnapshotBackend ---> FileBackend   (JSON file, atomic replace)
//!     |                   +--> MemoryBackend (tests, fakes)
//!     |
//!     +-- BootstrapChain ----> BundledSnapshot -> RegistryDefaults
//! ```
//!
//! The backing file lives under a [`StorageLocation`] picked once at
//! startup: a persistent project directory or an ephemeral temp directory.
//!
//! # Modules
//!
//! - [`store`] -- [`WinCountStore`]: `load_all`, `update_one`, `update_many`
//! - [`backend`] -- The [`SnapshotBackend`] trait and its implementations
//! - [`bootstrap`] -- First-run snapshot providers
//! - [`location`] -- Storage-location strategy
//! - [`error`] -- [`StoreError`]

pub mod backend;
pub mod bootstrap;
pub mod error;
pub mod location;
pub mod store;

// Re-export primary types for convenience.
pub use backend::{FileBackend, MemoryBackend, SnapshotBackend};
pub use bootstrap::{BootstrapChain, BundledSnapshot, RegistryDefaults, SnapshotProvider};
pub use error::StoreError;
pub use location::{DEFAULT_FILE_NAME, StorageLocation};
pub use store::WinCountStore;

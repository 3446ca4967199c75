//! Static reference data for the pick pool.
//!
//! Two read-only collections live here:
//!
//! - [`TeamRegistry`] -- the team catalog (identity, group, seed, preset
//!   wins), ordered by group then seed.
//! - [`Roster`] -- the participants and their picks.
//!
//! Both are built once at startup, either from the built-in 2025 playoff
//! data ([`catalog`], [`roster::default_roster`]) or from YAML files, and
//! are never mutated afterwards. Live win counts are an overlay kept by
//! `pickpool-store`, not part of the registry.

pub mod catalog;
pub mod error;
pub mod registry;
pub mod roster;

pub use catalog::{playoff_registry, playoff_teams};
pub use error::RegistryError;
pub use registry::TeamRegistry;
pub use roster::{Roster, default_participants, default_roster};

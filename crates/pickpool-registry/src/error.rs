//! Error types for the `pickpool-registry` crate.
//!
//! All fallible operations in this crate return [`RegistryError`].

use pickpool_types::{Group, ParticipantId, TeamId};

/// Errors that can occur while building or loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two catalog entries share the same team id.
    #[error("duplicate team id: {0}")]
    DuplicateTeam(TeamId),

    /// Two teams in the same group share a seed.
    #[error("duplicate seed {seed} in group {group}")]
    DuplicateSeed {
        /// The group holding the clash.
        group: Group,
        /// The repeated seed.
        seed: u32,
    },

    /// A seed of zero was supplied (seeds are 1-based).
    #[error("team {0} has seed 0; seeds start at 1")]
    ZeroSeed(TeamId),

    /// Two roster entries share the same participant id.
    #[error("duplicate participant id: {0}")]
    DuplicateParticipant(ParticipantId),

    /// A pick uses a position outside the valid range.
    #[error("participant {participant} has invalid {group} position {position}")]
    InvalidPosition {
        /// The offending participant.
        participant: ParticipantId,
        /// The group the pick was made in.
        group: Group,
        /// The out-of-range position.
        position: u8,
    },

    /// Failed to read a catalog or roster file from disk.
    #[error("failed to read reference data file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse reference data YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },
}

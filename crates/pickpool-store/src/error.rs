//! Error types for the win-count store.
//!
//! [`StoreError`] has exactly three kinds. `NotFound` and
//! `InvalidArgument` are caller errors detected before any I/O;
//! `StorageUnavailable` covers every read, parse, or write failure of the
//! backing snapshot.

use pickpool_types::TeamId;

/// Errors that can occur in the win-count store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The team id is not in the catalog.
    #[error("team {0} not found")]
    NotFound(TeamId),

    /// The requested win count is not a valid non-negative count.
    #[error("invalid win count {wins} for team {team}: {reason}")]
    InvalidArgument {
        /// The team the update targeted.
        team: TeamId,
        /// The rejected value.
        wins: i64,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The backing snapshot could not be read, parsed, or written.
    #[error("storage unavailable ({location}): {message}")]
    StorageUnavailable {
        /// Human-readable description of the backing resource.
        location: String,
        /// What went wrong.
        message: String,
    },
}

impl StoreError {
    /// Build a [`StoreError::StorageUnavailable`] from any displayable cause.
    pub fn unavailable(location: impl Into<String>, cause: impl core::fmt::Display) -> Self {
        Self::StorageUnavailable {
            location: location.into(),
            message: cause.to_string(),
        }
    }

    /// Whether the error was caused by the caller rather than the storage.
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidArgument { .. })
    }
}

//! Type-safe identifier wrappers around integer ids.
//!
//! Teams and participants are keyed by small stable integers assigned in
//! the catalog and roster files. Wrapping them prevents passing a
//! participant id where a team id is expected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`u32`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u32);

        impl $name {
            /// Return the inner integer value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a team in the catalog.
    TeamId
}

define_id! {
    /// Unique identifier for a pool participant.
    ParticipantId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&TeamId(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));

        let back: Option<ParticipantId> = serde_json::from_str("12").ok();
        assert_eq!(back, Some(ParticipantId(12)));
    }

    #[test]
    fn display_shows_inner_value() {
        assert_eq!(TeamId::from(3).to_string(), "3");
        assert_eq!(u32::from(ParticipantId(9)), 9);
    }
}

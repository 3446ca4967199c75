//! Enumeration types for the pick pool.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the two disjoint groups (conferences) teams belong to.
///
/// Ordering matters: every iteration over picks visits [`Group::Eastern`]
/// before [`Group::Western`], which is what makes best-pick tie breaking
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Group {
    /// Eastern conference (group A).
    Eastern,
    /// Western conference (group B).
    Western,
}

impl Group {
    /// Both groups in scoring order.
    pub const ALL: [Self; 2] = [Self::Eastern, Self::Western];

    /// Lowercase name used in query strings and pick maps.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eastern => "eastern",
            Self::Western => "western",
        }
    }
}

impl core::fmt::Display for Group {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGroup(pub String);

impl core::fmt::Display for UnknownGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown group `{}` (expected `eastern` or `western`)", self.0)
    }
}

impl std::error::Error for UnknownGroup {}

impl core::str::FromStr for Group {
    type Err = UnknownGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("eastern") || s.eq_ignore_ascii_case("east") {
            Ok(Self::Eastern)
        } else if s.eq_ignore_ascii_case("western") || s.eq_ignore_ascii_case("west") {
            Ok(Self::Western)
        } else {
            Err(UnknownGroup(s.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Eastern".parse::<Group>(), Ok(Group::Eastern));
        assert_eq!("WEST".parse::<Group>(), Ok(Group::Western));
        assert!("central".parse::<Group>().is_err());
    }

    #[test]
    fn eastern_sorts_first() {
        assert!(Group::Eastern < Group::Western);
        assert_eq!(Group::ALL.first(), Some(&Group::Eastern));
    }
}

//! Participant roster: the pool entries scored against the live teams.
//!
//! The roster is reference data. It is validated once on load and then
//! only read. Picks naming a team the catalog does not know are kept (they
//! score zero) but logged, since that usually means a stale roster file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use pickpool_types::{
    Group, MAX_POSITION, MIN_POSITION, Participant, ParticipantId, PickSet, TeamId,
};
use serde::Deserialize;

use crate::error::RegistryError;
use crate::registry::TeamRegistry;

/// On-disk shape of a roster file: `participants: [ ... ]`.
#[derive(Debug, Deserialize)]
struct RosterFile {
    participants: Vec<Participant>,
}

/// The validated list of pool participants, in entry order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Validate and wrap a participant list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateParticipant`] if two entries share
    /// an id, or [`RegistryError::InvalidPosition`] for a position outside
    /// `1..=8`.
    pub fn new(
        participants: Vec<Participant>,
        registry: &TeamRegistry,
    ) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        for participant in &participants {
            if !seen.insert(participant.id) {
                return Err(RegistryError::DuplicateParticipant(participant.id));
            }
            for (group, position, team_id) in participant.picks.iter() {
                if !(MIN_POSITION..=MAX_POSITION).contains(&position) {
                    return Err(RegistryError::InvalidPosition {
                        participant: participant.id,
                        group,
                        position,
                    });
                }
                if !registry.contains(team_id) {
                    tracing::warn!(
                        participant = %participant.id,
                        %group,
                        position,
                        team = %team_id,
                        "Pick references a team missing from the catalog; it will score zero"
                    );
                }
            }
        }

        tracing::debug!(participant_count = participants.len(), "Roster loaded");
        Ok(Self { participants })
    }

    /// Load a roster from a YAML file with a top-level `participants` list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] or [`RegistryError::Yaml`] for
    /// unreadable input, or any validation error from [`Roster::new`].
    pub fn from_file(path: &Path, registry: &TeamRegistry) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, registry)
    }

    /// Parse a roster from a YAML string.
    ///
    /// # Errors
    ///
    /// See [`Roster::from_file`].
    pub fn parse(yaml: &str, registry: &TeamRegistry) -> Result<Self, RegistryError> {
        let file: RosterFile = serde_yml::from_str(yaml)?;
        Self::new(file.participants, registry)
    }

    /// All participants in entry order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Look up a participant by id.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Build a group pick map from `(position, team)` pairs.
fn picks(pairs: [(u8, u32); 8]) -> BTreeMap<u8, TeamId> {
    pairs.into_iter().map(|(pos, id)| (pos, TeamId(id))).collect()
}

/// Helper to build a roster [`Participant`].
fn entry(
    id: u32,
    name: &str,
    email: &str,
    eastern: [(u8, u32); 8],
    western: [(u8, u32); 8],
) -> Participant {
    let mut pick_set = PickSet::default();
    *pick_set.group_mut(Group::Eastern) = picks(eastern);
    *pick_set.group_mut(Group::Western) = picks(western);
    Participant {
        id: ParticipantId(id),
        name: name.to_owned(),
        email: Some(email.to_owned()),
        picks: pick_set,
    }
}

/// The built-in roster that ships with the built-in catalog.
pub fn default_participants() -> Vec<Participant> {
    vec![
        entry(
            1,
            "John Otto",
            "john.bell@example.com",
            [(1, 6), (2, 5), (3, 7), (4, 8), (5, 2), (6, 1), (7, 3), (8, 4)],
            [(1, 15), (2, 16), (3, 11), (4, 12), (5, 13), (6, 14), (7, 10), (8, 9)],
        ),
        entry(
            2,
            "Karen",
            "sarah.johnson@example.com",
            [(1, 8), (2, 4), (3, 6), (4, 1), (5, 7), (6, 3), (7, 2), (8, 5)],
            [(1, 16), (2, 15), (3, 14), (4, 12), (5, 10), (6, 11), (7, 13), (8, 9)],
        ),
        entry(
            3,
            "",
            "mike.smith@example.com",
            [(1, 2), (2, 4), (3, 6), (4, 8), (5, 1), (6, 3), (7, 5), (8, 7)],
            [(1, 10), (2, 12), (3, 14), (4, 16), (5, 9), (6, 11), (7, 13), (8, 15)],
        ),
        entry(
            4,
            "",
            "emily.rodriguez@example.com",
            [(1, 3), (2, 5), (3, 7), (4, 1), (5, 2), (6, 4), (7, 6), (8, 8)],
            [(1, 11), (2, 13), (3, 15), (4, 9), (5, 10), (6, 12), (7, 14), (8, 16)],
        ),
        entry(
            5,
            "",
            "david.wilson@example.com",
            [(1, 4), (2, 3), (3, 2), (4, 1), (5, 8), (6, 7), (7, 6), (8, 5)],
            [(1, 14), (2, 13), (3, 12), (4, 11), (5, 10), (6, 9), (7, 16), (8, 15)],
        ),
    ]
}

/// Build the built-in roster validated against `registry`.
///
/// # Errors
///
/// Returns [`RegistryError`] if the hard-coded data violates a roster
/// invariant (should not happen).
pub fn default_roster(registry: &TeamRegistry) -> Result<Roster, RegistryError> {
    Roster::new(default_participants(), registry)
}

//! Core entity structs for the pick pool.
//!
//! Covers the static catalog entry ([`Team`]), participant reference data
//! ([`Participant`], [`PickSet`]), the persisted win-count snapshot
//! ([`WinSnapshot`]) and the derived scoring projections
//! ([`ScoredParticipant`], [`ParticipantBreakdown`]).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Group;
use crate::ids::{ParticipantId, TeamId};

/// Lowest position a participant may assign within a group.
pub const MIN_POSITION: u8 = 1;

/// Highest position a participant may assign within a group.
pub const MAX_POSITION: u8 = 8;

/// Current win count per team. Absent teams use the catalog default.
pub type WinCounts = BTreeMap<TeamId, u32>;

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// A competing team as exposed by the live team list.
///
/// Everything except `wins` is fixed when the catalog is loaded. `wins`
/// holds the catalog default until the win-count overlay replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Team {
    /// Stable identifier.
    pub id: TeamId,
    /// Display name (e.g. "Winnipeg Jets").
    pub name: String,
    /// Short code (e.g. "WPG").
    pub abbreviation: String,
    /// Which of the two groups the team plays in.
    pub group: Group,
    /// Subgroup label (division).
    pub division: String,
    /// Logo asset path used by the front end.
    #[serde(default)]
    pub logo: String,
    /// Current win count.
    #[serde(default)]
    pub wins: u32,
    /// Seed rank within the group, 1-based and unique per group.
    pub seed: u32,
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

/// A participant's picks: position (1..=8) to team, per group.
///
/// Maps may be sparse. Keys are unique by construction, so a participant
/// can never hold the same position twice in one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PickSet {
    /// Eastern conference picks keyed by position.
    #[serde(default)]
    pub eastern: BTreeMap<u8, TeamId>,
    /// Western conference picks keyed by position.
    #[serde(default)]
    pub western: BTreeMap<u8, TeamId>,
}

impl PickSet {
    /// Picks for a single group.
    pub const fn group(&self, group: Group) -> &BTreeMap<u8, TeamId> {
        match group {
            Group::Eastern => &self.eastern,
            Group::Western => &self.western,
        }
    }

    /// Mutable picks for a single group.
    pub const fn group_mut(&mut self, group: Group) -> &mut BTreeMap<u8, TeamId> {
        match group {
            Group::Eastern => &mut self.eastern,
            Group::Western => &mut self.western,
        }
    }

    /// Iterate every pick as `(group, position, team)`: eastern before
    /// western, ascending position within each group.
    pub fn iter(&self) -> impl Iterator<Item = (Group, u8, TeamId)> + '_ {
        Group::ALL.into_iter().flat_map(move |group| {
            self.group(group)
                .iter()
                .map(move |(&position, &team_id)| (group, position, team_id))
        })
    }

    /// Total number of picks across both groups.
    pub fn len(&self) -> usize {
        self.eastern.len().saturating_add(self.western.len())
    }

    /// Whether the participant has made no picks at all.
    pub fn is_empty(&self) -> bool {
        self.eastern.is_empty() && self.western.is_empty()
    }
}

/// A pool participant. Reference data, never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Participant {
    /// Stable identifier.
    pub id: ParticipantId,
    /// Display name. May be empty.
    #[serde(default)]
    pub name: String,
    /// Optional contact label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The participant's picks.
    #[serde(default)]
    pub picks: PickSet,
}

// ---------------------------------------------------------------------------
// Persisted snapshot
// ---------------------------------------------------------------------------

/// One persisted `(team, wins)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TeamRecord {
    /// Team the record belongs to.
    pub id: TeamId,
    /// Win count at the time of writing.
    pub wins: u32,
}

/// The full persisted win-count document.
///
/// Serialized as `{ "teams": [ { "id": 1, "wins": 2 }, ... ] }`. The
/// timestamp is optional so hand-written seed files stay valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WinSnapshot {
    /// Ordered team records.
    pub teams: Vec<TeamRecord>,
    /// When the snapshot was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WinSnapshot {
    /// Build a snapshot from a win-count mapping (ordered by team id).
    pub fn from_counts(counts: &WinCounts) -> Self {
        Self {
            teams: counts
                .iter()
                .map(|(&id, &wins)| TeamRecord { id, wins })
                .collect(),
            updated_at: None,
        }
    }

    /// Collapse the record list into a mapping. When a team has duplicate
    /// records the first one wins, the same record [`WinSnapshot::upsert`]
    /// rewrites.
    pub fn to_counts(&self) -> WinCounts {
        let mut counts = WinCounts::new();
        for record in &self.teams {
            counts.entry(record.id).or_insert(record.wins);
        }
        counts
    }

    /// Current wins for `id`, if the snapshot holds a record for it.
    pub fn wins_for(&self, id: TeamId) -> Option<u32> {
        self.teams.iter().find(|r| r.id == id).map(|r| r.wins)
    }

    /// Replace the record for `id`, or append one if none exists.
    ///
    /// Later duplicate records for `id` are dropped so exactly one remains.
    /// Returns the previous value of the first record when one existed.
    pub fn upsert(&mut self, id: TeamId, wins: u32) -> Option<u32> {
        let previous = self.wins_for(id);
        if previous.is_none() {
            self.teams.push(TeamRecord { id, wins });
            return None;
        }

        let mut seen = false;
        self.teams.retain_mut(|record| {
            if record.id != id {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            record.wins = wins;
            true
        });
        previous
    }
}

// ---------------------------------------------------------------------------
// Derived scoring projections
// ---------------------------------------------------------------------------

/// The single highest-value pick of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BestPick {
    /// Team that produced the points.
    pub team_id: TeamId,
    /// Group the pick was made in.
    pub group: Group,
    /// Position the participant assigned to the team.
    pub position: u8,
    /// Points contributed (`wins * position`).
    pub points: u64,
}

/// Per-group score subtotals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GroupSubtotals {
    /// Eastern conference subtotal.
    pub eastern: u64,
    /// Western conference subtotal.
    pub western: u64,
}

impl GroupSubtotals {
    /// Subtotal for one group.
    pub const fn get(&self, group: Group) -> u64 {
        match group {
            Group::Eastern => self.eastern,
            Group::Western => self.western,
        }
    }

    /// Mutable subtotal for one group.
    pub const fn get_mut(&mut self, group: Group) -> &mut u64 {
        match group {
            Group::Eastern => &mut self.eastern,
            Group::Western => &mut self.western,
        }
    }

    /// Sum of both groups.
    pub const fn total(&self) -> u64 {
        self.eastern.saturating_add(self.western)
    }
}

/// A participant with their computed score. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScoredParticipant {
    /// Participant identifier.
    pub participant_id: ParticipantId,
    /// Participant display name.
    pub name: String,
    /// Optional contact label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Total score across both groups.
    pub score: u64,
    /// Per-group subtotals.
    pub subtotals: GroupSubtotals,
    /// Highest single contribution, if any pick scored.
    pub best_pick: Option<BestPick>,
}

/// One row of a participant's pick breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PickRow {
    /// Assigned position.
    pub position: u8,
    /// Picked team.
    pub team_id: TeamId,
    /// Team display name, `None` if the team is not in the live set.
    pub team_name: Option<String>,
    /// Team short code, `None` if the team is not in the live set.
    pub abbreviation: Option<String>,
    /// Current wins of the team (0 when unknown).
    pub wins: u32,
    /// Points contributed by this pick.
    pub points: u64,
}

/// Breakdown of one group's picks, highest position first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GroupBreakdown {
    /// The group.
    pub group: Group,
    /// Rows ordered by position, 8 down to 1.
    pub rows: Vec<PickRow>,
    /// Sum of `points` over `rows`.
    pub total: u64,
}

/// Full per-pick detail for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ParticipantBreakdown {
    /// Participant identifier.
    pub participant_id: ParticipantId,
    /// Participant display name.
    pub name: String,
    /// Eastern conference detail.
    pub eastern: GroupBreakdown,
    /// Western conference detail.
    pub western: GroupBreakdown,
    /// Total score (sum of both group totals).
    pub score: u64,
}

//! Read-through overlay: catalog teams with live win counts.
//!
//! The merge is a pure function of the immutable registry and a win-count
//! mapping. Teams missing from the mapping keep their catalog default, and
//! mapping entries for unknown teams are dropped.

use std::collections::BTreeMap;

use pickpool_registry::TeamRegistry;
use pickpool_types::{Group, Team, TeamId, WinCounts};

/// The live team set the scoring engine reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveTeams {
    /// Teams in catalog order.
    teams: Vec<Team>,
    /// Team id to position in `teams`.
    index: BTreeMap<TeamId, usize>,
}

impl LiveTeams {
    /// Wrap an already merged team list, keeping its order.
    ///
    /// If an id repeats, lookups resolve to its first occurrence.
    pub fn from_teams(teams: Vec<Team>) -> Self {
        let mut index = BTreeMap::new();
        for (pos, team) in teams.iter().enumerate() {
            index.entry(team.id).or_insert(pos);
        }
        Self { teams, index }
    }

    /// Look up a live team.
    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.index.get(&id).and_then(|&pos| self.teams.get(pos))
    }

    /// Current wins of `id`, or `None` if the team is not live.
    pub fn wins(&self, id: TeamId) -> Option<u32> {
        self.get(id).map(|t| t.wins)
    }

    /// All live teams in catalog order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Live teams of one group in seed order.
    pub fn in_group(&self, group: Group) -> impl Iterator<Item = &Team> + '_ {
        self.teams.iter().filter(move |t| t.group == group)
    }

    /// Consume into the ordered team list.
    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }

    /// Number of live teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether there are no live teams.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Merge the catalog with a win-count overlay.
pub fn merge_live_teams(registry: &TeamRegistry, wins: &WinCounts) -> LiveTeams {
    let teams = registry
        .list_teams()
        .iter()
        .map(|team| Team {
            wins: wins.get(&team.id).copied().unwrap_or(team.wins),
            ..team.clone()
        })
        .collect();
    LiveTeams::from_teams(teams)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pickpool_registry::playoff_registry;

    use super::*;

    #[test]
    fn overlay_replaces_only_listed_teams() {
        let registry = playoff_registry().unwrap();
        let mut wins = WinCounts::new();
        wins.insert(TeamId(9), 4);
        wins.insert(TeamId(1), 0);
        wins.insert(TeamId(999), 12);

        let live = merge_live_teams(&registry, &wins);
        assert_eq!(live.len(), 16);
        assert_eq!(live.wins(TeamId(9)), Some(4));
        assert_eq!(live.wins(TeamId(1)), Some(0));
        assert_eq!(live.wins(TeamId(2)), Some(2));
        assert_eq!(live.wins(TeamId(999)), None);
    }

    #[test]
    fn overlay_keeps_catalog_order_and_metadata() {
        let registry = playoff_registry().unwrap();
        let live = merge_live_teams(&registry, &WinCounts::new());
        let ids: Vec<u32> = live.teams().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
        assert_eq!(live.get(TeamId(5)).unwrap().abbreviation, "FLA");
        assert_eq!(live.in_group(Group::Western).count(), 8);
    }
}

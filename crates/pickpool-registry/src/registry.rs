//! The immutable team catalog.
//!
//! [`TeamRegistry`] is built once at startup and never mutated. Teams are
//! stored grouped (eastern first) and seeded, so [`TeamRegistry::list_teams`]
//! always returns the same stable order. An id index backs point lookups.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use pickpool_types::{Group, Team, TeamId, WinCounts};
use serde::Deserialize;

use crate::error::RegistryError;

/// On-disk shape of a catalog file: `teams: [ ... ]`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    teams: Vec<Team>,
}

/// Read-only catalog of every competing team.
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    /// Teams in display order: group, then seed.
    teams: Vec<Team>,
    /// Team id to position in `teams`.
    index: BTreeMap<TeamId, usize>,
}

impl TeamRegistry {
    /// Build a registry from an unordered list of teams.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTeam`] if two teams share an id,
    /// [`RegistryError::DuplicateSeed`] if two teams in the same group share
    /// a seed, or [`RegistryError::ZeroSeed`] for a seed of 0.
    pub fn new(mut teams: Vec<Team>) -> Result<Self, RegistryError> {
        let mut seen_seeds: BTreeSet<(Group, u32)> = BTreeSet::new();
        for team in &teams {
            if team.seed == 0 {
                return Err(RegistryError::ZeroSeed(team.id));
            }
            if !seen_seeds.insert((team.group, team.seed)) {
                return Err(RegistryError::DuplicateSeed {
                    group: team.group,
                    seed: team.seed,
                });
            }
        }

        teams.sort_by_key(|t| (t.group, t.seed));

        let mut index = BTreeMap::new();
        for (pos, team) in teams.iter().enumerate() {
            if index.insert(team.id, pos).is_some() {
                return Err(RegistryError::DuplicateTeam(team.id));
            }
        }

        tracing::debug!(team_count = teams.len(), "Team registry built");
        Ok(Self { teams, index })
    }

    /// Load a catalog from a YAML file with a top-level `teams` list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] if the file cannot be read,
    /// [`RegistryError::Yaml`] if it does not parse, or any validation error
    /// from [`TeamRegistry::new`].
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// See [`TeamRegistry::from_file`].
    pub fn parse(yaml: &str) -> Result<Self, RegistryError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        Self::new(file.teams)
    }

    /// All teams, grouped then seeded.
    pub fn list_teams(&self) -> &[Team] {
        &self.teams
    }

    /// Look up a single team.
    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.index.get(&id).and_then(|&pos| self.teams.get(pos))
    }

    /// Whether `id` names a catalog team.
    pub fn contains(&self, id: TeamId) -> bool {
        self.index.contains_key(&id)
    }

    /// Teams of one group in seed order.
    pub fn teams_in_group(&self, group: Group) -> impl Iterator<Item = &Team> + '_ {
        self.teams.iter().filter(move |t| t.group == group)
    }

    /// Number of catalog teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// The catalog's default win count for every team.
    ///
    /// Used to synthesize a first snapshot and as the fallback for teams
    /// absent from a persisted one.
    pub fn default_wins(&self) -> WinCounts {
        self.teams.iter().map(|t| (t.id, t.wins)).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;

    fn team(id: u32, group: Group, seed: u32, wins: u32) -> Team {
        Team {
            id: TeamId(id),
            name: format!("Team {id}"),
            abbreviation: format!("T{id}"),
            group,
            division: String::from("Test"),
            logo: String::new(),
            wins,
            seed,
        }
    }

    #[test]
    fn list_is_grouped_then_seeded() {
        let registry = TeamRegistry::new(vec![
            team(3, Group::Western, 2, 0),
            team(1, Group::Eastern, 2, 0),
            team(4, Group::Western, 1, 0),
            team(2, Group::Eastern, 1, 0),
        ])
        .unwrap();

        let ids: Vec<u32> = registry.list_teams().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 1, 4, 3]);
        assert_eq!(registry.get_team(TeamId(3)).unwrap().seed, 2);
        assert!(registry.get_team(TeamId(99)).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = TeamRegistry::new(vec![
            team(1, Group::Eastern, 1, 0),
            team(1, Group::Western, 1, 0),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateTeam(TeamId(1)))));
    }

    #[test]
    fn rejects_duplicate_seed_within_group() {
        let result = TeamRegistry::new(vec![
            team(1, Group::Eastern, 1, 0),
            team(2, Group::Eastern, 1, 0),
        ]);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateSeed { group: Group::Eastern, seed: 1 })
        ));
    }

    #[test]
    fn default_wins_reflect_catalog_presets() {
        let registry = TeamRegistry::new(vec![
            team(1, Group::Eastern, 1, 2),
            team(2, Group::Western, 1, 0),
        ])
        .unwrap();
        let wins = registry.default_wins();
        assert_eq!(wins.get(&TeamId(1)), Some(&2));
        assert_eq!(wins.get(&TeamId(2)), Some(&0));
    }

    #[test]
    fn parses_yaml_catalog() {
        let yaml = r"
teams:
  - id: 1
    name: Alpha
    abbreviation: ALP
    group: Eastern
    division: North
    seed: 1
  - id: 2
    name: Beta
    abbreviation: BET
    group: Western
    division: South
    wins: 3
    seed: 1
";
        let registry = TeamRegistry::parse(yaml).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.teams_in_group(Group::Western).count(), 1);
        assert_eq!(registry.list_teams()[1].wins, 3);
    }
}

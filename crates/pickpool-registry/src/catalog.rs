//! Built-in catalog: the 2025 playoff field.
//!
//! Sixteen teams, eight per conference, seeded 1 through 8. The eastern
//! teams carry a preset of two wins each from the opening games; the
//! western teams start at zero.

use pickpool_types::{Group, Team, TeamId};

use crate::error::RegistryError;
use crate::registry::TeamRegistry;

/// Helper to build a catalog [`Team`].
#[allow(clippy::too_many_arguments)]
fn team(
    id: u32,
    name: &str,
    abbreviation: &str,
    group: Group,
    division: &str,
    logo: &str,
    wins: u32,
    seed: u32,
) -> Team {
    Team {
        id: TeamId(id),
        name: name.to_owned(),
        abbreviation: abbreviation.to_owned(),
        group,
        division: division.to_owned(),
        logo: format!("/teams/{logo}.png"),
        wins,
        seed,
    }
}

/// The raw team list of the built-in catalog.
pub fn playoff_teams() -> Vec<Team> {
    use Group::{Eastern, Western};

    vec![
        // --- Eastern ---
        team(1, "Washington Capitals", "WSH", Eastern, "Metropolitan", "capitals", 2, 1),
        team(2, "Toronto Maple Leafs", "TOR", Eastern, "Atlantic", "mapleleafs", 2, 2),
        team(3, "Tampa Bay Lightning", "TBL", Eastern, "Atlantic", "lightning", 2, 3),
        team(4, "Carolina Hurricanes", "CAR", Eastern, "Metropolitan", "hurricanes", 2, 4),
        team(5, "Florida Panthers", "FLA", Eastern, "Atlantic", "panthers", 2, 5),
        team(6, "New Jersey Devils", "NJD", Eastern, "Metropolitan", "devils", 2, 6),
        team(7, "Ottawa Senators", "OTT", Eastern, "Atlantic", "senators", 2, 7),
        team(8, "Montreal Canadiens", "MTL", Eastern, "Atlantic", "canadiens", 2, 8),
        // --- Western ---
        team(9, "Winnipeg Jets", "WPG", Western, "Central", "jets", 0, 1),
        team(10, "Vegas Golden Knights", "VGK", Western, "Pacific", "goldenknights", 0, 2),
        team(11, "Dallas Stars", "DAL", Western, "Central", "stars", 0, 3),
        team(12, "Los Angeles Kings", "LAK", Western, "Pacific", "kings", 0, 4),
        team(13, "Colorado Avalanche", "COL", Western, "Central", "avalanche", 0, 5),
        team(14, "Edmonton Oilers", "EDM", Western, "Pacific", "oilers", 0, 6),
        team(15, "Minnesota Wild", "MIN", Western, "Central", "wild", 0, 7),
        team(16, "St. Louis Blues", "STL", Western, "Central", "blues", 0, 8),
    ]
}

/// Build the registry for the built-in catalog.
///
/// # Errors
///
/// Returns [`RegistryError`] if the hard-coded data violates a registry
/// invariant (should not happen).
pub fn playoff_registry() -> Result<TeamRegistry, RegistryError> {
    TeamRegistry::new(playoff_teams())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn builtin_catalog_has_two_groups_of_eight() {
        let registry = playoff_registry().unwrap();
        assert_eq!(registry.len(), 16);
        for group in Group::ALL {
            let seeds: Vec<u32> = registry.teams_in_group(group).map(|t| t.seed).collect();
            assert_eq!(seeds, (1..=8).collect::<Vec<_>>());
        }
    }

    #[test]
    fn builtin_presets_match_season_start() {
        let registry = playoff_registry().unwrap();
        assert_eq!(registry.get_team(TeamId(1)).unwrap().wins, 2);
        assert_eq!(registry.get_team(TeamId(16)).unwrap().wins, 0);
        assert_eq!(registry.get_team(TeamId(10)).unwrap().abbreviation, "VGK");
    }
}

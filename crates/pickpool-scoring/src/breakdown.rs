//! Per-pick detail for a single participant.
//!
//! This is the "picks" view: every pick with its team, current wins and
//! points, highest position first within each group.

use pickpool_types::{Group, GroupBreakdown, Participant, ParticipantBreakdown, PickRow};

use crate::engine::pick_points;
use crate::overlay::LiveTeams;

/// Breakdown of one group's picks.
pub fn group_breakdown(participant: &Participant, group: Group, live: &LiveTeams) -> GroupBreakdown {
    let rows: Vec<PickRow> = participant
        .picks
        .group(group)
        .iter()
        .rev()
        .map(|(&position, &team_id)| {
            let team = live.get(team_id);
            PickRow {
                position,
                team_id,
                team_name: team.map(|t| t.name.clone()),
                abbreviation: team.map(|t| t.abbreviation.clone()),
                wins: team.map_or(0, |t| t.wins),
                points: pick_points(live, team_id, position),
            }
        })
        .collect();
    let total = rows.iter().fold(0_u64, |acc, r| acc.saturating_add(r.points));

    GroupBreakdown { group, rows, total }
}

/// Full breakdown of a participant's picks in both groups.
pub fn pick_breakdown(participant: &Participant, live: &LiveTeams) -> ParticipantBreakdown {
    let eastern = group_breakdown(participant, Group::Eastern, live);
    let western = group_breakdown(participant, Group::Western, live);
    let score = eastern.total.saturating_add(western.total);

    ParticipantBreakdown {
        participant_id: participant.id,
        name: participant.name.clone(),
        eastern,
        western,
        score,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use pickpool_registry::{default_participants, playoff_registry};
    use pickpool_types::{ParticipantId, TeamId, WinCounts};

    use super::*;
    use crate::engine::score_participant;
    use crate::overlay::merge_live_teams;

    #[test]
    fn rows_run_from_position_eight_down() {
        let registry = playoff_registry().unwrap();
        let live = merge_live_teams(&registry, &registry.default_wins());
        let john = default_participants().remove(0);

        let breakdown = pick_breakdown(&john, &live);
        let positions: Vec<u8> = breakdown.eastern.rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![8, 7, 6, 5, 4, 3, 2, 1]);

        let top = &breakdown.eastern.rows[0];
        assert_eq!(top.abbreviation.as_deref(), Some("CAR"));
        assert_eq!(top.wins, 2);
        assert_eq!(top.points, 16);
        assert_eq!(breakdown.western.total, 0);
    }

    #[test]
    fn breakdown_total_matches_engine_score() {
        let registry = playoff_registry().unwrap();
        let mut wins = registry.default_wins();
        wins.insert(TeamId(12), 3);
        wins.insert(TeamId(15), 2);
        let live = merge_live_teams(&registry, &wins);

        for p in default_participants() {
            let breakdown = pick_breakdown(&p, &live);
            let scored = score_participant(&p, &live);
            assert_eq!(breakdown.score, scored.score);
            assert_eq!(breakdown.eastern.total, scored.subtotals.eastern);
            assert_eq!(breakdown.western.total, scored.subtotals.western);
        }
    }

    #[test]
    fn unknown_team_row_has_no_name() {
        let registry = playoff_registry().unwrap();
        let live = merge_live_teams(&registry, &WinCounts::new());
        let mut p = default_participants().remove(1);
        p.id = ParticipantId(50);
        p.picks.western.clear();
        p.picks.western.insert(3, TeamId(404));

        let breakdown = pick_breakdown(&p, &live);
        let row = &breakdown.western.rows[0];
        assert!(row.team_name.is_none());
        assert_eq!(row.wins, 0);
        assert_eq!(row.points, 0);
    }
}

//! Participant scoring and standings.
//!
//! A pick at position `p` on a team with `w` wins is worth `w * p` points.
//! A participant's score is the sum over every pick in both groups. Picks
//! on teams that are not in the live set are worth nothing; they are never
//! an error.
//!
//! Iteration order is fixed (eastern before western, ascending position)
//! so the best pick is deterministic: on equal points the first pick seen
//! is kept.

use pickpool_types::{BestPick, GroupSubtotals, Participant, ScoredParticipant, TeamId};

use crate::overlay::LiveTeams;

/// Points for a single pick. Zero if the team is not live.
pub fn pick_points(live: &LiveTeams, team_id: TeamId, position: u8) -> u64 {
    live.wins(team_id)
        .map_or(0, |wins| u64::from(wins).saturating_mul(u64::from(position)))
}

/// Score one participant against the live team set.
pub fn score_participant(participant: &Participant, live: &LiveTeams) -> ScoredParticipant {
    let mut subtotals = GroupSubtotals::default();
    let mut best_pick: Option<BestPick> = None;

    for (group, position, team_id) in participant.picks.iter() {
        let points = pick_points(live, team_id, position);

        let subtotal = subtotals.get_mut(group);
        *subtotal = subtotal.saturating_add(points);

        // Strictly greater: ties keep the earlier pick, zero never qualifies.
        if points > best_pick.map_or(0, |b| b.points) {
            best_pick = Some(BestPick {
                team_id,
                group,
                position,
                points,
            });
        }
    }

    ScoredParticipant {
        participant_id: participant.id,
        name: participant.name.clone(),
        email: participant.email.clone(),
        score: subtotals.total(),
        subtotals,
        best_pick,
    }
}

/// Score every participant and order them by descending score.
///
/// The sort is stable: participants with equal scores keep their input
/// order. No secondary criterion is applied.
pub fn rank_participants(participants: &[Participant], live: &LiveTeams) -> Vec<ScoredParticipant> {
    let mut scored: Vec<ScoredParticipant> = participants
        .iter()
        .map(|p| score_participant(p, live))
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(
        participants = scored.len(),
        leader = scored.first().map(|s| s.score),
        "Standings computed"
    );
    scored
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use pickpool_registry::{default_participants, playoff_registry};
    use pickpool_types::{Group, ParticipantId, PickSet, Team, WinCounts};

    use super::*;
    use crate::overlay::merge_live_teams;

    fn team(id: u32, group: Group, wins: u32) -> Team {
        Team {
            id: TeamId(id),
            name: format!("Team {id}"),
            abbreviation: format!("T{id}"),
            group,
            division: String::new(),
            logo: String::new(),
            wins,
            seed: id,
        }
    }

    fn participant(id: u32, eastern: &[(u8, u32)], western: &[(u8, u32)]) -> Participant {
        let mut picks = PickSet::default();
        for &(pos, team) in eastern {
            picks.eastern.insert(pos, TeamId(team));
        }
        for &(pos, team) in western {
            picks.western.insert(pos, TeamId(team));
        }
        Participant {
            id: ParticipantId(id),
            name: format!("P{id}"),
            email: None,
            picks,
        }
    }

    #[test]
    fn two_wins_at_position_six_is_twelve() {
        let live = LiveTeams::from_teams(vec![team(1, Group::Eastern, 2), team(2, Group::Eastern, 0)]);
        let p = participant(1, &[(6, 1), (3, 2)], &[]);

        let scored = score_participant(&p, &live);
        assert_eq!(scored.score, 12);
        assert_eq!(scored.subtotals.eastern, 12);
        assert_eq!(scored.subtotals.western, 0);
        assert_eq!(
            scored.best_pick,
            Some(BestPick {
                team_id: TeamId(1),
                group: Group::Eastern,
                position: 6,
                points: 12,
            })
        );
    }

    #[test]
    fn all_zero_wins_means_no_best_pick() {
        let live = LiveTeams::from_teams(vec![team(1, Group::Eastern, 0), team(9, Group::Western, 0)]);
        let p = participant(1, &[(8, 1)], &[(8, 9)]);

        let scored = score_participant(&p, &live);
        assert_eq!(scored.score, 0);
        assert!(scored.best_pick.is_none());
    }

    #[test]
    fn missing_team_contributes_zero() {
        let live = LiveTeams::from_teams(vec![team(1, Group::Eastern, 3)]);
        let p = participant(1, &[(2, 1), (8, 404)], &[(5, 405)]);

        let scored = score_participant(&p, &live);
        assert_eq!(scored.score, 6);
        assert_eq!(scored.best_pick.unwrap().team_id, TeamId(1));
    }

    #[test]
    fn empty_picks_score_zero() {
        let live = LiveTeams::from_teams(vec![team(1, Group::Eastern, 3)]);
        let scored = score_participant(&participant(1, &[], &[]), &live);
        assert_eq!(scored.score, 0);
        assert!(scored.best_pick.is_none());
    }

    #[test]
    fn best_pick_ties_keep_eastern_then_lowest_position() {
        // 4 * 2 = 8 (east pos 2), 2 * 4 = 8 (east pos 4), 1 * 8 = 8 (west pos 8)
        let live = LiveTeams::from_teams(vec![
            team(1, Group::Eastern, 4),
            team(2, Group::Eastern, 2),
            team(9, Group::Western, 1),
        ]);
        let p = participant(1, &[(4, 2), (2, 1)], &[(8, 9)]);

        let best = score_participant(&p, &live).best_pick.unwrap();
        assert_eq!(best.group, Group::Eastern);
        assert_eq!(best.position, 2);
        assert_eq!(best.team_id, TeamId(1));
        assert_eq!(best.points, 8);
    }

    #[test]
    fn western_pick_wins_when_strictly_greater() {
        let live = LiveTeams::from_teams(vec![team(1, Group::Eastern, 1), team(9, Group::Western, 1)]);
        let p = participant(1, &[(7, 1)], &[(8, 9)]);

        let scored = score_participant(&p, &live);
        assert_eq!(scored.score, 15);
        assert_eq!(scored.best_pick.unwrap().group, Group::Western);
    }

    #[test]
    fn score_is_sum_of_subtotals_for_builtin_roster() {
        let registry = playoff_registry().unwrap();
        let mut wins = WinCounts::new();
        wins.insert(TeamId(10), 3);
        wins.insert(TeamId(14), 1);
        let live = merge_live_teams(&registry, &wins);

        for p in default_participants() {
            let scored = score_participant(&p, &live);
            assert_eq!(scored.score, scored.subtotals.eastern + scored.subtotals.western);

            for group in Group::ALL {
                let expected: u64 = p
                    .picks
                    .group(group)
                    .iter()
                    .map(|(&pos, &id)| u64::from(live.wins(id).unwrap_or(0)) * u64::from(pos))
                    .sum();
                assert_eq!(scored.subtotals.get(group), expected);
            }
        }
    }

    #[test]
    fn builtin_roster_at_season_start() {
        // Every eastern team has 2 wins, every western team 0, and each
        // participant uses positions 1..=8 once in the east:
        // 2 * (1 + 2 + ... + 8) = 72.
        let registry = playoff_registry().unwrap();
        let live = merge_live_teams(&registry, &registry.default_wins());
        let standings = rank_participants(&default_participants(), &live);

        assert_eq!(standings.len(), 5);
        assert!(standings.iter().all(|s| s.score == 72));
        // All tied: input order preserved.
        let ids: Vec<u32> = standings.iter().map(|s| s.participant_id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        // John Otto's best pick is position 8 (Carolina, 16 points).
        let john = &standings[0];
        assert_eq!(john.best_pick.unwrap().points, 16);
        assert_eq!(john.best_pick.unwrap().team_id, TeamId(4));
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let live = LiveTeams::from_teams(vec![team(1, Group::Eastern, 1), team(2, Group::Eastern, 2)]);
        let participants = vec![
            participant(1, &[(1, 1)], &[]), // 1
            participant(2, &[(4, 2)], &[]), // 8
            participant(3, &[(1, 2)], &[]), // 2
            participant(4, &[(8, 1)], &[]), // 8
            participant(5, &[(2, 1)], &[]), // 2
        ];

        let standings = rank_participants(&participants, &live);
        let order: Vec<(u32, u64)> = standings
            .iter()
            .map(|s| (s.participant_id.0, s.score))
            .collect();
        assert_eq!(order, vec![(2, 8), (4, 8), (3, 2), (5, 2), (1, 1)]);

        for pair in standings.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

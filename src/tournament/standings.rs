//! Standings derivation
//!
//! Standings are never stored. They are recomputed from the roster and the
//! result store every time a screen renders.

use serde::{Deserialize, Serialize};

use super::results::ResultStore;
use super::roster::{Roster, TeamId};
use super::schedule::Schedule;
use crate::consts::WIN_POINTS;

/// Leaderboard ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RankBy {
    /// Wins descending
    #[default]
    #[serde(rename = "wins")]
    Wins,
    /// Points descending, then wins descending
    #[serde(rename = "points+wins")]
    PointsThenWins,
}

impl RankBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankBy::Wins => "wins",
            RankBy::PointsThenWins => "points+wins",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wins" => Some(RankBy::Wins),
            "points+wins" | "points" => Some(RankBy::PointsThenWins),
            _ => None,
        }
    }
}

/// How standings are scored and sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingsConfig {
    pub rank_by: RankBy,
    /// Points awarded to the winner of a match
    pub win_points: u32,
}

impl Default for StandingsConfig {
    fn default() -> Self {
        Self {
            rank_by: RankBy::Wins,
            win_points: WIN_POINTS,
        }
    }
}

/// One team's derived record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub team: TeamId,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
}

impl Standing {
    fn new(team: TeamId) -> Self {
        Self {
            team,
            played: 0,
            wins: 0,
            losses: 0,
            points: 0,
        }
    }

    /// Win percentage in [0, 100], 0 when nothing played
    pub fn win_pct(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.played) * 100.0
        }
    }

    /// Win percentage as shown on the leaderboard ("66.7%", "0%")
    pub fn win_pct_label(&self) -> String {
        if self.played == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", self.win_pct())
        }
    }
}

/// Derive standings for every roster team, sorted per `config`.
///
/// Matches with no winner, or whose winner is neither of the match's teams,
/// are unresolved and count for nobody. Matches naming a team outside the
/// roster are skipped.
pub fn compute(
    roster: &Roster,
    schedule: &Schedule,
    results: &ResultStore,
    config: &StandingsConfig,
) -> Vec<Standing> {
    let mut table: Vec<Standing> = (0..roster.len()).map(|i| Standing::new(TeamId(i))).collect();

    for m in schedule.iter() {
        let Some(winner) = results.winner_of(m.id) else {
            continue;
        };
        let Some(loser) = m.opponent_of(winner) else {
            log::debug!("Ignoring winner {} for match {}: not a participant", winner, m.id);
            continue;
        };
        if winner.0 >= table.len() || loser.0 >= table.len() {
            continue;
        }

        let w = &mut table[winner.0];
        w.wins = w.wins.saturating_add(1);
        w.played = w.played.saturating_add(1);
        w.points = w.points.saturating_add(config.win_points);

        let l = &mut table[loser.0];
        l.losses = l.losses.saturating_add(1);
        l.played = l.played.saturating_add(1);
    }

    // sort_by is stable, so ties keep roster order
    match config.rank_by {
        RankBy::Wins => table.sort_by(|a, b| b.wins.cmp(&a.wins)),
        RankBy::PointsThenWins => {
            table.sort_by(|a, b| b.points.cmp(&a.points).then(b.wins.cmp(&a.wins)))
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::results::MatchField;
    use crate::tournament::schedule::{MatchId, generate};
    use proptest::prelude::*;

    fn abc() -> Roster {
        let mut roster = Roster::default();
        roster.set_roster(&["A", "B", "C"]).unwrap();
        roster
    }

    fn win(results: &mut ResultStore, a: usize, b: usize, winner: usize) {
        results.set_field(MatchId::new(a, b), MatchField::Winner(Some(TeamId(winner))));
    }

    #[test]
    fn test_scenario_a_beats_b_b_beats_c() {
        let roster = abc();
        let schedule = generate(&roster);
        let mut results = ResultStore::new();
        win(&mut results, 0, 1, 0);
        win(&mut results, 1, 2, 1);

        let table = compute(&roster, &schedule, &results, &StandingsConfig::default());
        let summary: Vec<_> = table
            .iter()
            .map(|s| (roster.name_of(s.team), s.wins, s.played, s.losses))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A".to_string(), 1, 1, 0),
                ("B".to_string(), 1, 2, 1),
                ("C".to_string(), 0, 1, 1),
            ]
        );
    }

    #[test]
    fn test_empty_results_all_zero() {
        let roster = abc();
        let table = compute(
            &roster,
            &generate(&roster),
            &ResultStore::new(),
            &StandingsConfig::default(),
        );
        assert_eq!(table.len(), 3);
        for (i, s) in table.iter().enumerate() {
            assert_eq!(s.team, TeamId(i));
            assert_eq!((s.played, s.wins, s.losses, s.points), (0, 0, 0, 0));
            assert_eq!(s.win_pct_label(), "0%");
        }
    }

    #[test]
    fn test_illegal_winner_is_unresolved() {
        let roster = abc();
        let mut results = ResultStore::new();
        win(&mut results, 0, 1, 2);
        let table = compute(
            &roster,
            &generate(&roster),
            &results,
            &StandingsConfig::default(),
        );
        assert!(table.iter().all(|s| s.played == 0));
    }

    #[test]
    fn test_result_for_team_outside_roster_is_skipped() {
        let roster = abc();
        let mut results = ResultStore::new();
        win(&mut results, 0, 5, 5);
        win(&mut results, 0, 2, 2);
        let table = compute(
            &roster,
            &generate(&roster),
            &results,
            &StandingsConfig::default(),
        );
        assert_eq!(table[0].team, TeamId(2));
        assert_eq!(table[0].wins, 1);
        assert_eq!(table.iter().map(|s| s.played).sum::<u32>(), 2);
    }

    #[test]
    fn test_match_beyond_roster_is_skipped() {
        let roster = abc();
        let mut results = ResultStore::new();
        win(&mut results, 0, 4, 4);
        win(&mut results, 3, 4, 3);
        win(&mut results, 1, 2, 1);
        let table = compute(
            &roster,
            &Schedule::for_team_count(5),
            &results,
            &StandingsConfig::default(),
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].team, TeamId(1));
        assert_eq!(table.iter().map(|s| s.played).sum::<u32>(), 2);
        assert_eq!(table.iter().find(|s| s.team == TeamId(0)).map(|s| s.losses), Some(0));
    }

    #[test]
    fn test_huge_win_points_saturate() {
        let roster = abc();
        let mut results = ResultStore::new();
        win(&mut results, 0, 1, 0);
        win(&mut results, 0, 2, 0);
        let config = StandingsConfig {
            rank_by: RankBy::PointsThenWins,
            win_points: u32::MAX,
        };
        let table = compute(&roster, &generate(&roster), &results, &config);
        assert_eq!(table[0].team, TeamId(0));
        assert_eq!(table[0].points, u32::MAX);
        assert_eq!(table[0].wins, 2);
    }

    #[test]
    fn test_points_then_wins() {
        let roster = abc();
        let mut results = ResultStore::new();
        win(&mut results, 1, 2, 2);
        win(&mut results, 0, 2, 2);
        win(&mut results, 0, 1, 1);
        let config = StandingsConfig {
            rank_by: RankBy::PointsThenWins,
            win_points: 3,
        };
        let table = compute(&roster, &generate(&roster), &results, &config);
        let order: Vec<_> = table.iter().map(|s| s.team).collect();
        assert_eq!(order, vec![TeamId(2), TeamId(1), TeamId(0)]);
        assert_eq!(table[0].points, 6);
        assert_eq!(table[1].points, 3);
        assert_eq!(table[1].win_pct_label(), "50.0%");
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let roster = abc();
        let mut results = ResultStore::new();
        win(&mut results, 0, 1, 1);
        win(&mut results, 0, 2, 2);
        let table = compute(
            &roster,
            &generate(&roster),
            &results,
            &StandingsConfig::default(),
        );
        let order: Vec<_> = table.iter().map(|s| s.team).collect();
        assert_eq!(order, vec![TeamId(1), TeamId(2), TeamId(0)]);
    }

    #[test]
    fn test_rank_by_from_str() {
        assert_eq!(RankBy::from_str("Wins"), Some(RankBy::Wins));
        assert_eq!(RankBy::from_str("points+wins"), Some(RankBy::PointsThenWins));
        assert_eq!(RankBy::from_str("goals"), None);
        assert_eq!(
            serde_json::to_string(&RankBy::PointsThenWins).unwrap(),
            "\"points+wins\""
        );
    }

    proptest! {
        #[test]
        fn prop_compute_is_pure_and_consistent(
            n in 2usize..12,
            picks in proptest::collection::vec(0u8..3, 0..66),
        ) {
            let roster = Roster::with_placeholders(n);
            let schedule = generate(&roster);
            let mut results = ResultStore::new();
            for (m, pick) in schedule.iter().zip(picks.iter()) {
                match *pick {
                    0 => {}
                    1 => results.set_field(m.id, MatchField::Winner(Some(m.team1()))),
                    _ => results.set_field(m.id, MatchField::Winner(Some(m.team2()))),
                }
            }
            let config = StandingsConfig { rank_by: RankBy::PointsThenWins, win_points: 3 };
            let a = compute(&roster, &schedule, &results, &config);
            let b = compute(&roster, &schedule, &results, &config);
            prop_assert_eq!(&a, &b);

            let wins: u32 = a.iter().map(|s| s.wins).sum();
            let losses: u32 = a.iter().map(|s| s.losses).sum();
            let played: u32 = a.iter().map(|s| s.played).sum();
            prop_assert_eq!(wins as usize, results.recorded_count());
            prop_assert_eq!(wins, losses);
            prop_assert_eq!(played, wins * 2);
            prop_assert!(a.windows(2).all(|w| w[0].points >= w[1].points));
        }
    }
}

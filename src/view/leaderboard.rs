//! Leaderboard screen

use std::fmt;

use crate::app::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    pub win_pct: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardView {
    pub rows: Vec<LeaderboardRow>,
}

impl LeaderboardView {
    pub fn build(state: &AppState) -> Self {
        let rows = state
            .standings()
            .into_iter()
            .map(|s| LeaderboardRow {
                team: state.roster.name_of(s.team),
                played: s.played,
                wins: s.wins,
                losses: s.losses,
                points: s.points,
                win_pct: s.win_pct_label(),
            })
            .collect();
        Self { rows }
    }
}

/// Plain-text table, used by the native build
impl fmt::Display for LeaderboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.team.chars().count())
            .max()
            .unwrap_or(4)
            .max(4);
        writeln!(
            f,
            "{:<width$}  {:>6}  {:>4}  {:>6}  {:>6}",
            "Team", "Played", "Wins", "Losses", "Win %"
        )?;
        for r in &self.rows {
            writeln!(
                f,
                "{:<width$}  {:>6}  {:>4}  {:>6}  {:>6}",
                r.team, r.played, r.wins, r.losses, r.win_pct
            )?;
        }
        Ok(())
    }
}

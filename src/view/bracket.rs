//! Bracket screen: teams as slots ordered by wins

use crate::app::AppState;
use crate::tournament::{RankBy, StandingsConfig, compute};

/// Stagger between slot entrance animations, seconds
pub const SLOT_ANIMATION_STAGGER: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct BracketSlot {
    pub team: String,
    pub wins: u32,
    /// CSS `animation-delay`, seconds
    pub animation_delay: f64,
}

impl BracketSlot {
    pub fn wins_label(&self) -> String {
        format!("Wins: {}", self.wins)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BracketView {
    pub slots: Vec<BracketSlot>,
}

impl BracketView {
    /// Always ordered by wins, whatever the leaderboard setting
    pub fn build(state: &AppState) -> Self {
        let config = StandingsConfig {
            rank_by: RankBy::Wins,
            ..state.settings.standings_config()
        };
        let slots = compute(&state.roster, &state.schedule(), &state.results, &config)
            .into_iter()
            .enumerate()
            .map(|(i, s)| BracketSlot {
                team: state.roster.name_of(s.team),
                wins: s.wins,
                animation_delay: i as f64 * SLOT_ANIMATION_STAGGER,
            })
            .collect();
        Self { slots }
    }
}

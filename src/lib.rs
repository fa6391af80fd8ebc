//! Paradox Tournament - a browser-resident round-robin tracker
//!
//! Core modules:
//! - `tournament`: Roster, schedule generation, results, standings (pure)
//! - `persistence`: Key-value storage, JSON layout, legacy migration
//! - `platform`: Browser/native platform abstraction
//! - `app`: Application state and command handlers
//! - `view`: Per-screen projections of the state
//! - `settings`: Persisted preferences

pub mod app;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod tournament;
pub mod view;

pub use app::{AppState, Tracker};
pub use error::{Result, TrackerError, ValidationError};
pub use settings::TrackerSettings;

/// Tournament constants
pub mod consts {
    /// Smallest roster a round-robin makes sense for
    pub const MIN_TEAMS: usize = 2;
    /// Largest placeholder roster settings may ask for
    pub const MAX_TEAMS: usize = 64;
    /// Placeholder teams created on first load
    pub const DEFAULT_TEAM_COUNT: usize = 10;
    /// Points for a win (draws do not exist)
    pub const WIN_POINTS: u32 = 3;
    /// Upper bound on configurable points per win
    pub const MAX_WIN_POINTS: u32 = 100;
}

/// Number of matches in a single round-robin of `n` teams
#[inline]
pub fn round_robin_match_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_match_count() {
        assert_eq!(round_robin_match_count(0), 0);
        assert_eq!(round_robin_match_count(1), 0);
        assert_eq!(round_robin_match_count(2), 1);
        assert_eq!(round_robin_match_count(10), 45);
    }
}

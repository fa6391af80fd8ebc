//! Error types for tracker operations
//!
//! Every error is recoverable at the point of the user action that caused it.

use thiserror::Error;

use crate::tournament::{MatchId, TeamId};

/// A rejected user edit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Team names have been set and locked. They cannot be changed anymore.")]
    RosterLocked,

    #[error("A round-robin needs at least {min} teams, got {got}")]
    TooFewTeams { min: usize, got: usize },

    #[error("Please select a winner")]
    WinnerRequired,

    #[error("Team {team} did not play in Team {} vs Team {}", .match_id.team1, .match_id.team2)]
    IllegalWinner { match_id: MatchId, team: TeamId },

    #[error("No match {0} in the current schedule")]
    UnknownMatch(MatchId),
}

/// Main error type for tracker operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Absent or malformed JSON under a storage key
    #[error("Missing or malformed data under '{key}': {reason}")]
    MissingData { key: String, reason: String },

    /// The backing store refused a write (quota, private mode, ...)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    pub fn missing(key: &str, reason: impl Into<String>) -> Self {
        TrackerError::MissingData {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Validation errors are shown to the user; everything else is logged and
    /// replaced by defaults.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, TrackerError::Validation(_))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

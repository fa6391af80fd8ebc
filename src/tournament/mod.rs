//! Tournament core
//!
//! Everything the screens derive their content from. This module must stay
//! pure:
//! - No storage or DOM access
//! - Schedule and standings are functions of their inputs only
//! - Stable iteration order (roster index, then match id)

pub mod results;
pub mod roster;
pub mod schedule;
pub mod standings;

pub use results::{MatchField, MatchRecord, ResultStore, format_date, parse_date};
pub use roster::{Roster, Team, TeamId, placeholder_name};
pub use schedule::{Match, MatchId, Schedule, generate};
pub use standings::{RankBy, Standing, StandingsConfig, compute};

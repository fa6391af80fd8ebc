//! Tracker settings
//!
//! Persisted separately from tournament data in the same store.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TEAM_COUNT, MAX_TEAMS, MAX_WIN_POINTS, MIN_TEAMS, WIN_POINTS};
use crate::error::Result;
use crate::persistence::{KeyValueStore, keys, load_json, save_json};
use crate::tournament::{RankBy, StandingsConfig};

/// Tracker settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    // === Leaderboard ===
    /// Leaderboard ordering
    pub rank_by: RankBy,
    /// Points per win (only affects ordering under `points+wins`)
    pub win_points: u32,

    // === Setup ===
    /// Number of placeholder teams on first load
    pub default_team_count: usize,

    // === Diagnostics ===
    /// `log` level name: error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            rank_by: RankBy::Wins,
            win_points: WIN_POINTS,
            default_team_count: DEFAULT_TEAM_COUNT,
            log_level: "info".to_string(),
        }
    }
}

impl TrackerSettings {
    /// Standings configuration derived from these settings
    pub fn standings_config(&self) -> StandingsConfig {
        StandingsConfig {
            rank_by: self.rank_by,
            win_points: self.win_points(),
        }
    }

    /// Effective points per win, capped at `MAX_WIN_POINTS`
    pub fn win_points(&self) -> u32 {
        self.win_points.min(MAX_WIN_POINTS)
    }

    /// Effective placeholder team count, within `MIN_TEAMS..=MAX_TEAMS`
    pub fn team_count(&self) -> usize {
        self.default_team_count.clamp(MIN_TEAMS, MAX_TEAMS)
    }

    /// Parsed log level, `Info` when unrecognized
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Load settings from the store, defaults on absence or corruption
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json(store, keys::SETTINGS) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{}, using default settings", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &impl KeyValueStore) -> Result<()> {
        save_json(store, keys::SETTINGS, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

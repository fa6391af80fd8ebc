//! Save/load of tracker state
//!
//! Features:
//! - Storage-agnostic `KeyValueStore` (LocalStorage on web, memory natively)
//! - JSON values under fixed keys
//! - Malformed data loads as defaults instead of failing
//! - One-time migration of legacy result layouts

pub mod migration;
pub mod store;

pub use migration::{MigrationReport, migrate};
pub use store::{KeyValueStore, MemoryStore, load_json, load_json_or_default, save_json};

use crate::error::Result;
use crate::tournament::{MatchRecord, ResultStore, Roster, Team};

/// Storage keys
pub mod keys {
    /// JSON array of team names
    pub const TEAMS: &str = "teams";
    /// `"true"` once the roster is locked, absent otherwise
    pub const TEAMS_LOCKED: &str = "teamsLocked";
    /// JSON array of canonical match records
    pub const MATCHES: &str = "matches";
    /// Schema version of the persisted layout
    pub const SCHEMA_VERSION: &str = "schemaVersion";
    /// Legacy map of "A vs B" → winner name
    pub const LEGACY_RESULTS: &str = "results";
    /// Tracker configuration
    pub const SETTINGS: &str = "tracker_settings";
}

/// Current persisted layout version
pub const SCHEMA_VERSION: u32 = 1;

/// Load the roster, falling back to `default_count` placeholder teams when the
/// stored list is absent, malformed or too short.
pub fn load_roster(store: &impl KeyValueStore, default_count: usize) -> Roster {
    let locked = matches!(
        store.get_item(keys::TEAMS_LOCKED),
        Ok(Some(ref v)) if v == "true"
    );

    let names: Vec<String> = load_json_or_default(store, keys::TEAMS);
    if names.len() < crate::consts::MIN_TEAMS {
        if !names.is_empty() {
            log::warn!("Stored roster has {} team(s), using defaults", names.len());
        }
        let mut roster = Roster::with_placeholders(default_count);
        if locked {
            roster.lock();
        }
        return roster;
    }

    Roster::from_parts(names.into_iter().map(Team::new).collect(), locked)
}

pub fn save_roster(store: &impl KeyValueStore, roster: &Roster) -> Result<()> {
    save_json(store, keys::TEAMS, &roster.names())?;
    if roster.is_locked() {
        store.set_item(keys::TEAMS_LOCKED, "true")?;
    }
    Ok(())
}

/// Load canonical match records.
///
/// Decoded record by record: a malformed entry is dropped on its own, and a
/// value that is not an array loads as an empty store.
pub fn load_results(store: &impl KeyValueStore) -> ResultStore {
    let raw: Vec<serde_json::Value> = load_json_or_default(store, keys::MATCHES);
    let records = raw.into_iter().filter_map(|value| {
        serde_json::from_value::<MatchRecord>(value)
            .map_err(|e| log::warn!("Dropping malformed match record: {}", e))
            .ok()
    });
    ResultStore::from_records(records)
}

pub fn save_results(store: &impl KeyValueStore, results: &ResultStore) -> Result<()> {
    save_json(store, keys::MATCHES, &results.to_vec())
}

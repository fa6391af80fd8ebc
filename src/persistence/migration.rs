//! One-time migration of legacy result layouts
//!
//! Older pages stored results in three different shapes:
//! - `results`: map of `"A vs B"` label → winner name
//! - flat keys: `<A_vs_B>_date` / `<A_vs_B>_winner`, one per match
//! - `matches`: array of `{ team1, team2, date, winner }` using team names
//!
//! All of them are folded into the canonical `matches` array of
//! `MatchRecord`s, the legacy keys are removed and `schemaVersion` is set so
//! the migration never runs twice.

use serde::Deserialize;

use super::store::{KeyValueStore, load_json, save_json};
use super::{SCHEMA_VERSION, keys, load_roster, save_results};
use crate::error::Result;
use crate::tournament::{
    Match, MatchField, MatchRecord, ResultStore, Roster, Schedule, TeamId, generate, parse_date,
};

/// What a migration run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version found before migrating (0 when no version key existed)
    pub from_version: u32,
    /// Winners recovered from the legacy `results` map
    pub legacy_results: usize,
    /// Records recovered from a name-based `matches` array
    pub legacy_records: usize,
    /// Dates and winners recovered from flat per-match keys
    pub flat_fields: usize,
    /// Legacy entries that matched nothing in the current schedule
    pub dropped: usize,
}

impl MigrationReport {
    pub fn migrated_anything(&self) -> bool {
        self.legacy_results + self.legacy_records + self.flat_fields > 0
    }
}

/// Name-based record written by older pages
#[derive(Debug, Deserialize)]
struct NamedRecord {
    team1: String,
    team2: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    winner: Option<String>,
}

/// Check if the stored layout predates the current schema
pub fn needs_migration(store: &impl KeyValueStore) -> bool {
    stored_version(store) < SCHEMA_VERSION
}

fn stored_version(store: &impl KeyValueStore) -> u32 {
    load_json::<u32>(store, keys::SCHEMA_VERSION)
        .ok()
        .flatten()
        .unwrap_or(0)
}

/// Flat-key prefix for a match: its label with whitespace runs replaced by `_`
pub fn flat_key_prefix(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("_")
}

/// A flat per-match key: `<A>_vs_<B>_date` or `<A>_vs_<B>_winner`
fn is_stale_flat_key(key: &str) -> bool {
    let label = key
        .strip_suffix("_date")
        .or_else(|| key.strip_suffix("_winner"));
    matches!(label, Some(label) if label.contains("_vs_"))
}

/// Resolve a winner name against the two teams of one match. Team 1 wins ties
/// when both teams share a name.
fn resolve_winner(m: &Match, roster: &Roster, name: &str) -> Option<TeamId> {
    let name = name.trim();
    [m.team1(), m.team2()]
        .into_iter()
        .find(|&id| roster.name_of(id) == name)
}

fn find_by_names<'a>(
    schedule: &'a Schedule,
    roster: &Roster,
    a: &str,
    b: &str,
) -> Option<&'a Match> {
    schedule.iter().find(|m| {
        let (n1, n2) = (roster.name_of(m.team1()), roster.name_of(m.team2()));
        (n1 == a && n2 == b) || (n1 == b && n2 == a)
    })
}

/// Fill a field only if the canonical record does not already have it
fn fill(results: &mut ResultStore, m: &Match, field: MatchField) -> bool {
    let existing = results.get_record(m.id);
    let empty = match field {
        MatchField::Date(_) => existing.and_then(|r| r.date).is_none(),
        MatchField::Winner(_) => existing.and_then(|r| r.winner).is_none(),
    };
    if empty {
        results.set_field(m.id, field);
    }
    empty
}

/// Migrate any legacy layout into the canonical schema.
///
/// Idempotent: once `schemaVersion` is current this does nothing.
pub fn migrate(store: &impl KeyValueStore) -> Result<MigrationReport> {
    let from_version = stored_version(store);
    let mut report = MigrationReport {
        from_version,
        ..Default::default()
    };
    if from_version >= SCHEMA_VERSION {
        if from_version > SCHEMA_VERSION {
            log::warn!(
                "Stored schema version {} is newer than {}, leaving it alone",
                from_version,
                SCHEMA_VERSION
            );
        }
        return Ok(report);
    }

    let roster = load_roster(store, crate::consts::DEFAULT_TEAM_COUNT);
    let schedule = generate(&roster);
    let mut results = ResultStore::new();

    // Each `matches` entry is either canonical or the name-based variant
    match load_json::<Vec<serde_json::Value>>(store, keys::MATCHES) {
        Ok(Some(entries)) => {
            let mut canonical = Vec::new();
            for entry in entries {
                if let Ok(record) = serde_json::from_value::<MatchRecord>(entry.clone()) {
                    canonical.push(record);
                    continue;
                }
                let named = serde_json::from_value::<NamedRecord>(entry).ok().and_then(|rec| {
                    find_by_names(&schedule, &roster, rec.team1.trim(), rec.team2.trim())
                        .map(|m| (m, rec))
                });
                let Some((m, rec)) = named else {
                    report.dropped += 1;
                    continue;
                };
                if let Some(date) = rec.date.as_deref().and_then(parse_date) {
                    results.set_field(m.id, MatchField::Date(Some(date)));
                }
                if let Some(winner) = rec.winner.as_deref().and_then(|w| resolve_winner(m, &roster, w)) {
                    results.set_field(m.id, MatchField::Winner(Some(winner)));
                }
                report.legacy_records += 1;
            }
            // Canonical fields win over named ones for the same match
            for record in canonical {
                let id = record.match_id;
                let existing = results.get_record(id).cloned();
                let date = record.date.or(existing.as_ref().and_then(|r| r.date));
                let winner = record.winner.or(existing.and_then(|r| r.winner));
                results.set_field(id, MatchField::Date(date));
                results.set_field(id, MatchField::Winner(winner));
            }
        }
        Ok(None) => {}
        Err(e) => log::warn!("{}, discarding it during migration", e),
    }

    match load_json::<std::collections::BTreeMap<String, String>>(store, keys::LEGACY_RESULTS) {
        Ok(Some(map)) => {
            for (label, winner) in map {
                let resolved = schedule
                    .find_by_label(&roster, &label)
                    .and_then(|m| resolve_winner(m, &roster, &winner).map(|w| (m, w)));
                match resolved {
                    Some((m, w)) => {
                        if fill(&mut results, m, MatchField::Winner(Some(w))) {
                            report.legacy_results += 1;
                        }
                    }
                    None => report.dropped += 1,
                }
            }
        }
        Ok(None) => {}
        Err(e) => log::warn!("{}, skipping legacy results", e),
    }

    let mut flat_keys = Vec::new();
    for m in schedule.iter() {
        let prefix = flat_key_prefix(&m.label(&roster));

        let date_key = format!("{}_date", prefix);
        if let Some(value) = store.get_item(&date_key)? {
            if let Some(date) = parse_date(&value) {
                if fill(&mut results, m, MatchField::Date(Some(date))) {
                    report.flat_fields += 1;
                }
            }
            flat_keys.push(date_key);
        }

        let winner_key = format!("{}_winner", prefix);
        if let Some(value) = store.get_item(&winner_key)? {
            if let Some(w) = resolve_winner(m, &roster, &value) {
                if fill(&mut results, m, MatchField::Winner(Some(w))) {
                    report.flat_fields += 1;
                }
            }
            flat_keys.push(winner_key);
        }
    }

    // Flat keys written under earlier team names match no current label
    for key in store.keys()? {
        if is_stale_flat_key(&key) && !flat_keys.contains(&key) {
            log::debug!("Dropping stale legacy key '{}'", key);
            report.dropped += 1;
            flat_keys.push(key);
        }
    }

    save_results(store, &results)?;
    store.remove_item(keys::LEGACY_RESULTS)?;
    for key in &flat_keys {
        store.remove_item(key)?;
    }
    save_json(store, keys::SCHEMA_VERSION, &SCHEMA_VERSION)?;

    if report.migrated_anything() {
        log::info!(
            "Migrated results from version {} to {} ({} legacy results, {} named records, {} flat fields, {} dropped)",
            from_version,
            SCHEMA_VERSION,
            report.legacy_results,
            report.legacy_records,
            report.flat_fields,
            report.dropped
        );
    }

    Ok(report)
}

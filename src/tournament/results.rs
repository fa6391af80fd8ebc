//! Per-match results
//!
//! A plain keyed map. It does not check that a winner actually played in the
//! match; that is the standings calculator's and the command handlers' job.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::roster::TeamId;
use super::schedule::MatchId;

/// Date format used by `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Recorded outcome of one match (canonical persisted schema)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub match_id: MatchId,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub winner: Option<TeamId>,
}

impl MatchRecord {
    pub fn new(match_id: MatchId) -> Self {
        Self {
            match_id,
            date: None,
            winner: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.winner.is_none()
    }
}

/// One editable field of a match record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Date(Option<NaiveDate>),
    Winner(Option<TeamId>),
}

/// Parse a date input value. Empty means "no date".
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Match id → record, iterated in schedule order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultStore {
    records: BTreeMap<MatchId, MatchRecord>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted records. Later duplicates overwrite earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = MatchRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.match_id, r)).collect(),
        }
    }

    pub fn get_record(&self, id: MatchId) -> Option<&MatchRecord> {
        self.records.get(&id)
    }

    /// Set one field, creating the record on first edit
    pub fn set_field(&mut self, id: MatchId, field: MatchField) {
        let record = self
            .records
            .entry(id)
            .or_insert_with(|| MatchRecord::new(id));
        match field {
            MatchField::Date(date) => record.date = date,
            MatchField::Winner(winner) => record.winner = winner,
        }
    }

    pub fn winner_of(&self, id: MatchId) -> Option<TeamId> {
        self.records.get(&id).and_then(|r| r.winner)
    }

    pub fn records(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.values()
    }

    /// Records in a form ready for `serde_json`
    pub fn to_vec(&self) -> Vec<MatchRecord> {
        self.records.values().cloned().collect()
    }

    /// Number of matches with a winner
    pub fn recorded_count(&self) -> usize {
        self.records.values().filter(|r| r.winner.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

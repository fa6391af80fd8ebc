//! Schedule screen: every pairing with its date and winner

use crate::app::AppState;
use crate::tournament::{MatchId, TeamId, format_date};

pub const SELECT_WINNER_LABEL: &str = "Select Winner";
pub const SAVE_RESULT_LABEL: &str = "Save Result";
pub const RESULT_SAVED_MESSAGE: &str = "Result saved!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerOption {
    pub team: TeamId,
    pub name: String,
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    pub id: MatchId,
    pub number: usize,
    pub label: String,
    /// `YYYY-MM-DD` or empty
    pub date: String,
    /// The two teams of the match, in order
    pub options: Vec<WinnerOption>,
    /// Preselected winner, only if it is one of `options`
    pub selected: Option<TeamId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    pub rows: Vec<MatchRow>,
}

impl ScheduleView {
    pub fn build(state: &AppState) -> Self {
        let roster = &state.roster;
        let rows = state
            .schedule()
            .iter()
            .map(|m| {
                let record = state.results.get_record(m.id);
                let options = [m.team1(), m.team2()]
                    .into_iter()
                    .map(|team| WinnerOption {
                        team,
                        name: roster.name_of(team),
                    })
                    .collect();
                MatchRow {
                    id: m.id,
                    number: m.number,
                    label: m.label(roster),
                    date: record
                        .and_then(|r| r.date)
                        .map(format_date)
                        .unwrap_or_default(),
                    options,
                    selected: record.and_then(|r| r.winner).filter(|&w| m.involves(w)),
                }
            })
            .collect();
        Self { rows }
    }

    pub fn row(&self, id: MatchId) -> Option<&MatchRow> {
        self.rows.iter().find(|r| r.id == id)
    }
}

/// Map a `<select>` value back to a team. Empty means no selection.
pub fn parse_winner_value(value: &str) -> Option<TeamId> {
    value.trim().parse().ok().map(TeamId)
}

/// `<select>` value for a team option
pub fn winner_value(team: TeamId) -> String {
    team.0.to_string()
}

//! Roster management
//!
//! The ordered team list plus the one-way lock that freezes it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_TEAMS;
use crate::error::ValidationError;

/// Stable team identity: position in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub usize);

impl TeamId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Displays 1-based, the way team numbers are shown to users
impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// A participating team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    pub name: String,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Placeholder shown for (and substituted into) a blank team slot
pub fn placeholder_name(index: usize) -> String {
    format!("Team {}", index + 1)
}

/// Ordered team list with a one-way lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<Team>,
    locked: bool,
}

impl Default for Roster {
    fn default() -> Self {
        Self::with_placeholders(crate::consts::DEFAULT_TEAM_COUNT)
    }
}

impl Roster {
    /// Unlocked roster of `count` placeholder teams
    pub fn with_placeholders(count: usize) -> Self {
        Self {
            teams: (0..count.max(MIN_TEAMS))
                .map(|i| Team::new(placeholder_name(i)))
                .collect(),
            locked: false,
        }
    }

    /// Rebuild a roster from persisted parts. Does not validate size, so a
    /// short stored roster still loads.
    pub fn from_parts(teams: Vec<Team>, locked: bool) -> Self {
        Self { teams, locked }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn names(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id.0)
    }

    /// Team name, or the placeholder if the id is out of range
    pub fn name_of(&self, id: TeamId) -> String {
        self.get(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| placeholder_name(id.0))
    }

    /// Replace the team names. Blank names become `Team N`.
    pub fn set_roster<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), ValidationError> {
        if self.locked {
            return Err(ValidationError::RosterLocked);
        }
        if names.len() < MIN_TEAMS {
            return Err(ValidationError::TooFewTeams {
                min: MIN_TEAMS,
                got: names.len(),
            });
        }

        self.teams = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.as_ref().trim();
                if name.is_empty() {
                    Team::new(placeholder_name(i))
                } else {
                    Team::new(name)
                }
            })
            .collect();
        Ok(())
    }

    /// Freeze the roster. Calling again is a no-op.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// The setup screen's single action: save the names, then lock
    pub fn save_and_lock<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), ValidationError> {
        self.set_roster(names)?;
        self.lock();
        Ok(())
    }
}

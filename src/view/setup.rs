//! Setup screen: name the teams, then lock them

use crate::app::AppState;
use crate::tournament::placeholder_name;

pub const SAVE_BUTTON_LABEL: &str = "Save Team Names (Lock Forever)";
pub const SAVED_MESSAGE: &str = "Teams saved and locked! They cannot be changed anymore.";
pub const LOCKED_MESSAGE: &str = "✅ Team names have been set and locked. You cannot change them.";

/// One team-name input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamInput {
    pub index: usize,
    pub value: String,
    pub placeholder: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupView {
    pub inputs: Vec<TeamInput>,
    pub locked: bool,
}

impl SetupView {
    pub fn build(state: &AppState) -> Self {
        let locked = state.roster.is_locked();
        let inputs = state
            .roster
            .teams()
            .iter()
            .enumerate()
            .map(|(index, team)| TeamInput {
                index,
                value: team.name.clone(),
                placeholder: placeholder_name(index),
                disabled: locked,
            })
            .collect();
        Self { inputs, locked }
    }

    /// Show the save button only while editable
    pub fn show_save_button(&self) -> bool {
        !self.locked
    }
}

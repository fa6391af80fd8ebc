//! Screen projections
//!
//! Each view is a pure function of `AppState`. The wasm entry point turns a
//! view into DOM; nothing here touches the browser.

pub mod bracket;
pub mod leaderboard;
pub mod schedule;
pub mod setup;

pub use bracket::{BracketSlot, BracketView};
pub use leaderboard::{LeaderboardRow, LeaderboardView};
pub use schedule::{MatchRow, ScheduleView, WinnerOption};
pub use setup::{SetupView, TeamInput};

/// The four pages of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Schedule,
    Leaderboard,
    Bracket,
}

impl Screen {
    /// Pick the screen from the page path (`/setup.html`, `/matches.html`, ...)
    pub fn from_path(path: &str) -> Option<Self> {
        if path.contains("setup.html") {
            Some(Screen::Setup)
        } else if path.contains("matches.html") {
            Some(Screen::Schedule)
        } else if path.contains("leaderboard.html") {
            Some(Screen::Leaderboard)
        } else if path.contains("bracket.html") {
            Some(Screen::Bracket)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Setup => "setup",
            Screen::Schedule => "schedule",
            Screen::Leaderboard => "leaderboard",
            Screen::Bracket => "bracket",
        }
    }
}

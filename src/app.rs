//! Application state and command handlers
//!
//! Each open screen owns one `Tracker`. The tracker holds the state loaded
//! from the store and applies user commands: validate, write through to the
//! store, update the in-memory state, and notify other screens when match
//! records change.

use crate::error::{Result, ValidationError};
use crate::persistence::{self, KeyValueStore, keys};
use crate::platform::ChangeNotifier;
use crate::settings::TrackerSettings;
use crate::tournament::{
    MatchField, MatchId, ResultStore, Roster, Schedule, Standing, TeamId, compute, generate,
};

/// Everything a screen renders from
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub roster: Roster,
    pub results: ResultStore,
    pub settings: TrackerSettings,
}

impl AppState {
    /// Read the full state. Never fails: unreadable data loads as defaults.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let settings = TrackerSettings::load(store);
        let roster = persistence::load_roster(store, settings.team_count());
        let results = persistence::load_results(store);
        log::info!(
            "Loaded {} teams ({}), {} recorded results",
            roster.len(),
            if roster.is_locked() { "locked" } else { "editable" },
            results.recorded_count()
        );
        Self {
            roster,
            results,
            settings,
        }
    }

    /// Regenerated on every call, never cached
    pub fn schedule(&self) -> Schedule {
        generate(&self.roster)
    }

    pub fn standings(&self) -> Vec<Standing> {
        compute(
            &self.roster,
            &self.schedule(),
            &self.results,
            &self.settings.standings_config(),
        )
    }
}

/// Per-screen command handler over a store and a change notifier
pub struct Tracker<S: KeyValueStore, N: ChangeNotifier> {
    store: S,
    notifier: N,
    state: AppState,
}

impl<S: KeyValueStore, N: ChangeNotifier> Tracker<S, N> {
    /// Migrate any legacy layout, then load
    pub fn open(store: S, notifier: N) -> Self {
        if let Err(e) = persistence::migrate(&store) {
            log::warn!("Migration failed: {}", e);
        }
        let state = AppState::load(&store);
        Self {
            store,
            notifier,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-read everything, e.g. after another screen wrote
    pub fn reload(&mut self) {
        self.state = AppState::load(&self.store);
    }

    /// Replace team names (setup screen, before locking)
    pub fn on_set_roster<T: AsRef<str>>(&mut self, names: &[T]) -> Result<()> {
        let mut roster = self.state.roster.clone();
        if let Err(e) = roster.set_roster(names) {
            log::warn!("Roster edit rejected: {}", e);
            return Err(e.into());
        }
        persistence::save_roster(&self.store, &roster)?;
        self.state.roster = roster;
        log::info!("Roster saved ({} teams)", self.state.roster.len());
        Ok(())
    }

    /// Lock the roster. Idempotent.
    pub fn on_lock_roster(&mut self) -> Result<()> {
        if self.state.roster.is_locked() {
            return Ok(());
        }
        let mut roster = self.state.roster.clone();
        roster.lock();
        persistence::save_roster(&self.store, &roster)?;
        self.state.roster = roster;
        log::info!("Roster locked");
        Ok(())
    }

    /// Save names and lock in one step ("Save Team Names (Lock Forever)")
    pub fn on_save_roster<T: AsRef<str>>(&mut self, names: &[T]) -> Result<()> {
        self.on_set_roster(names)?;
        self.on_lock_roster()
    }

    /// Set a match's date or winner.
    ///
    /// The match must be in the current schedule and a winner must be one of
    /// its two teams. Records are re-read before writing so concurrent edits
    /// from another screen to *other* matches survive; edits to the same match
    /// are last-write-wins.
    pub fn on_set_match_field(&mut self, id: MatchId, field: MatchField) -> Result<()> {
        let schedule = self.state.schedule();
        let Some(m) = schedule.get(id) else {
            return Err(ValidationError::UnknownMatch(id).into());
        };
        if let MatchField::Winner(Some(team)) = field {
            if !m.involves(team) {
                log::warn!("Rejected winner {} for match {}", team, id);
                return Err(ValidationError::IllegalWinner { match_id: id, team }.into());
            }
        }

        let mut results = persistence::load_results(&self.store);
        results.set_field(id, field);
        persistence::save_results(&self.store, &results)?;
        self.state.results = results;
        self.notifier.notify(keys::MATCHES);
        log::info!("Match {} updated: {:?}", id, field);
        Ok(())
    }

    /// The schedule screen's "Save Result": a winner is required
    pub fn on_save_result(&mut self, id: MatchId, winner: Option<TeamId>) -> Result<()> {
        let Some(winner) = winner else {
            return Err(ValidationError::WinnerRequired.into());
        };
        self.on_set_match_field(id, MatchField::Winner(Some(winner)))
    }

    /// Persist new settings and apply them to this screen
    pub fn on_update_settings(&mut self, settings: TrackerSettings) -> Result<()> {
        settings.save(&self.store)?;
        self.state.settings = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::persistence::MemoryStore;
    use crate::platform::{ChangeFeed, Silent};
    use crate::tournament::{RankBy, parse_date};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tracker() -> Tracker<MemoryStore, Silent> {
        Tracker::open(MemoryStore::new(), Silent)
    }

    #[test]
    fn test_first_load_defaults() {
        let t = tracker();
        assert_eq!(t.state().roster.len(), 10);
        assert_eq!(t.state().schedule().len(), 45);
        assert!(t.state().standings().iter().all(|s| s.played == 0));
    }

    #[test]
    fn test_save_roster_locks_and_persists() {
        let mut t = tracker();
        t.on_save_roster(&["A", "", "C"]).unwrap();
        assert!(t.state().roster.is_locked());
        assert_eq!(t.state().roster.names(), vec!["A", "Team 2", "C"]);

        let err = t.on_set_roster(&["X", "Y"]).unwrap_err();
        assert_eq!(err, TrackerError::Validation(ValidationError::RosterLocked));
        assert_eq!(t.state().roster.names(), vec!["A", "Team 2", "C"]);

        // Locking again is fine
        t.on_lock_roster().unwrap();

        let reopened = Tracker::open(t.store(), Silent);
        assert!(reopened.state().roster.is_locked());
        assert_eq!(reopened.state().roster.len(), 3);
    }

    #[test]
    fn test_scenario_through_commands() {
        let mut t = tracker();
        t.on_save_roster(&["A", "B", "C"]).unwrap();
        t.on_save_result(MatchId::new(0, 1), Some(TeamId(0))).unwrap();
        t.on_save_result(MatchId::new(1, 2), Some(TeamId(1))).unwrap();

        let order: Vec<_> = t
            .state()
            .standings()
            .iter()
            .map(|s| (s.team, s.wins, s.played))
            .collect();
        assert_eq!(
            order,
            vec![(TeamId(0), 1, 1), (TeamId(1), 1, 2), (TeamId(2), 0, 1)]
        );
    }

    #[test]
    fn test_save_result_requires_winner() {
        let mut t = tracker();
        let err = t.on_save_result(MatchId::new(0, 1), None).unwrap_err();
        assert_eq!(err.to_string(), "Please select a winner");
        assert!(t.state().results.is_empty());
    }

    #[test]
    fn test_illegal_winner_rejected() {
        let mut t = tracker();
        let err = t
            .on_set_match_field(MatchId::new(0, 1), MatchField::Winner(Some(TeamId(4))))
            .unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Validation(ValidationError::IllegalWinner { .. })
        ));
        let err = t
            .on_set_match_field(MatchId::new(0, 40), MatchField::Date(None))
            .unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Validation(ValidationError::UnknownMatch(_))
        ));
    }

    #[test]
    fn test_record_round_trip_through_store() {
        let mut t = tracker();
        let id = MatchId::new(2, 5);
        let date = parse_date("2025-09-20");
        t.on_set_match_field(id, MatchField::Date(date)).unwrap();
        t.on_set_match_field(id, MatchField::Winner(Some(TeamId(5)))).unwrap();

        let record = t.state().results.get_record(id).unwrap();
        assert_eq!((record.date, record.winner), (date, Some(TeamId(5))));

        t.reload();
        let record = t.state().results.get_record(id).unwrap();
        assert_eq!((record.date, record.winner), (date, Some(TeamId(5))));
    }

    #[test]
    fn test_clearing_winner() {
        let mut t = tracker();
        let id = MatchId::new(0, 1);
        t.on_save_result(id, Some(TeamId(1))).unwrap();
        t.on_set_match_field(id, MatchField::Winner(None)).unwrap();
        assert_eq!(t.state().results.winner_of(id), None);
    }

    #[test]
    fn test_other_screen_sees_update_via_notification() {
        let store = Rc::new(MemoryStore::new());
        let feed = Rc::new(ChangeFeed::new());

        let mut matches_screen = Tracker::open(Rc::clone(&store), Rc::clone(&feed));
        let leaderboard = Rc::new(RefCell::new(Tracker::open(Rc::clone(&store), Silent)));

        let lb = Rc::clone(&leaderboard);
        feed.subscribe(keys::MATCHES, move |_| lb.borrow_mut().reload());

        matches_screen
            .on_save_result(MatchId::new(0, 3), Some(TeamId(3)))
            .unwrap();

        let standings = leaderboard.borrow().state().standings();
        assert_eq!(standings[0].team, TeamId(3));
        assert_eq!(standings[0].wins, 1);
    }

    #[test]
    fn test_interleaved_screens_keep_other_matches() {
        let store = Rc::new(MemoryStore::new());
        let mut a = Tracker::open(Rc::clone(&store), Silent);
        let mut b = Tracker::open(Rc::clone(&store), Silent);

        a.on_save_result(MatchId::new(0, 1), Some(TeamId(0))).unwrap();
        b.on_save_result(MatchId::new(2, 3), Some(TeamId(3))).unwrap();
        // Same match: last write wins
        a.on_save_result(MatchId::new(2, 3), Some(TeamId(2))).unwrap();

        let fresh = AppState::load(&store);
        assert_eq!(fresh.results.winner_of(MatchId::new(0, 1)), Some(TeamId(0)));
        assert_eq!(fresh.results.winner_of(MatchId::new(2, 3)), Some(TeamId(2)));
    }

    #[test]
    fn test_settings_change_ranking() {
        let mut t = tracker();
        let settings = TrackerSettings {
            rank_by: RankBy::PointsThenWins,
            ..Default::default()
        };
        t.on_update_settings(settings.clone()).unwrap();
        t.reload();
        assert_eq!(t.state().settings, settings);
    }

    #[test]
    fn test_hostile_win_points_do_not_break_standings() {
        let store = MemoryStore::with_items([(
            keys::SETTINGS,
            r#"{"rank_by":"points+wins","win_points":4294967295}"#,
        )]);
        let mut t = Tracker::open(store, Silent);
        t.on_save_result(MatchId::new(0, 1), Some(TeamId(0))).unwrap();
        t.on_save_result(MatchId::new(0, 2), Some(TeamId(0))).unwrap();

        let standings = t.state().standings();
        assert_eq!(standings[0].team, TeamId(0));
        assert_eq!(standings[0].points, 2 * crate::consts::MAX_WIN_POINTS);
    }

    #[test]
    fn test_hostile_team_count_stays_bounded() {
        let store = MemoryStore::with_items([(keys::SETTINGS, r#"{"default_team_count":100000}"#)]);
        let t = Tracker::open(store, Silent);
        assert_eq!(t.state().roster.len(), crate::consts::MAX_TEAMS);
    }

    #[test]
    fn test_edit_keeps_records_next_to_a_bad_one() {
        let store = MemoryStore::with_items([
            (keys::SCHEMA_VERSION, "1"),
            (
                keys::MATCHES,
                r#"[{"matchId":"0-1","date":"2025-06-01","winner":0},{"matchId":"3-3","winner":3}]"#,
            ),
        ]);
        let mut t = Tracker::open(store, Silent);
        t.on_save_result(MatchId::new(2, 3), Some(TeamId(3))).unwrap();

        let fresh = AppState::load(t.store());
        assert_eq!(fresh.results.len(), 2);
        assert_eq!(fresh.results.winner_of(MatchId::new(0, 1)), Some(TeamId(0)));
        assert_eq!(fresh.results.winner_of(MatchId::new(2, 3)), Some(TeamId(3)));
    }

    #[test]
    fn test_legacy_data_migrated_on_open() {
        let store = MemoryStore::with_items([
            (keys::TEAMS, r#"["A","B","C"]"#),
            (keys::TEAMS_LOCKED, "true"),
            (keys::LEGACY_RESULTS, r#"{"A vs B":"B"}"#),
            ("A_vs_B_date", "2024-12-24"),
        ]);
        let t = Tracker::open(store, Silent);
        let record = t.state().results.get_record(MatchId::new(0, 1)).unwrap();
        assert_eq!(record.winner, Some(TeamId(1)));
        assert_eq!(record.date, parse_date("2024-12-24"));
    }
}

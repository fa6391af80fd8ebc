//! Round-robin schedule generation
//!
//! The schedule is a pure function of roster size. It is never persisted:
//! every screen regenerates it from the roster it just loaded, so it cannot
//! go stale when the roster changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::roster::{Roster, TeamId};

/// Identity of a pairing: the two roster indices, lower first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchId {
    pub team1: TeamId,
    pub team2: TeamId,
}

impl MatchId {
    /// Build an id from two indices in either order
    pub fn new(a: usize, b: usize) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self {
            team1: TeamId(lo),
            team2: TeamId(hi),
        }
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team1.0, self.team2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMatchIdError(String);

impl fmt::Display for ParseMatchIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid match id '{}'", self.0)
    }
}

impl std::error::Error for ParseMatchIdError {}

impl FromStr for MatchId {
    type Err = ParseMatchIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMatchIdError(s.to_string());
        let (a, b) = s.split_once('-').ok_or_else(err)?;
        let a: usize = a.trim().parse().map_err(|_| err())?;
        let b: usize = b.trim().parse().map_err(|_| err())?;
        if a == b {
            return Err(err());
        }
        Ok(MatchId::new(a, b))
    }
}

impl Serialize for MatchId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MatchId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A scheduled pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    /// 1-based position in the schedule
    pub number: usize,
}

impl Match {
    pub fn team1(&self) -> TeamId {
        self.id.team1
    }

    pub fn team2(&self) -> TeamId {
        self.id.team2
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.id.team1 == team || self.id.team2 == team
    }

    /// The other team, if `team` played in this match
    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if team == self.id.team1 {
            Some(self.id.team2)
        } else if team == self.id.team2 {
            Some(self.id.team1)
        } else {
            None
        }
    }

    /// Display label, e.g. "Wolves vs Bears"
    pub fn label(&self, roster: &Roster) -> String {
        format!(
            "{} vs {}",
            roster.name_of(self.id.team1),
            roster.name_of(self.id.team2)
        )
    }
}

/// Ordered list of every pairing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    matches: Vec<Match>,
}

/// Every unordered pair (i, j) with i < j, in lexicographic order
pub fn generate(roster: &Roster) -> Schedule {
    Schedule::for_team_count(roster.len())
}

impl Schedule {
    pub fn for_team_count(n: usize) -> Self {
        let mut matches = Vec::with_capacity(crate::round_robin_match_count(n));
        for i in 0..n {
            for j in (i + 1)..n {
                matches.push(Match {
                    id: MatchId::new(i, j),
                    number: matches.len() + 1,
                });
            }
        }
        Self { matches }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    /// Look up a match by id. Ids are in schedule order, so binary search works.
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches
            .binary_search_by(|m| m.id.cmp(&id))
            .ok()
            .map(|i| &self.matches[i])
    }

    /// Find a match by its display label. First hit wins when duplicate team
    /// names make labels collide.
    pub fn find_by_label(&self, roster: &Roster, label: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.label(roster) == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn roster_of(n: usize) -> Roster {
        Roster::with_placeholders(n)
    }

    #[test]
    fn test_three_teams() {
        let schedule = generate(&roster_of(3));
        let ids: Vec<_> = schedule.iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec![MatchId::new(0, 1), MatchId::new(0, 2), MatchId::new(1, 2)]
        );
        let numbers: Vec<_> = schedule.iter().map(|m| m.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_default_roster_has_45_matches() {
        assert_eq!(generate(&Roster::default()).len(), 45);
    }

    #[test]
    fn test_match_id_parse_and_display() {
        let id: MatchId = "2-7".parse().unwrap();
        assert_eq!(id, MatchId::new(7, 2));
        assert_eq!(id.to_string(), "2-7");
        assert!("3-3".parse::<MatchId>().is_err());
        assert!("A vs B".parse::<MatchId>().is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"2-7\"");
    }

    #[test]
    fn test_get_and_label() {
        let mut roster = roster_of(3);
        roster.set_roster(&["A", "B", "C"]).unwrap();
        let schedule = generate(&roster);
        let m = schedule.get(MatchId::new(1, 2)).unwrap();
        assert_eq!(m.number, 3);
        assert_eq!(m.label(&roster), "B vs C");
        assert_eq!(m.opponent_of(TeamId(2)), Some(TeamId(1)));
        assert_eq!(m.opponent_of(TeamId(0)), None);
        assert!(schedule.get(MatchId::new(0, 3)).is_none());
        assert_eq!(
            schedule.find_by_label(&roster, "A vs C").map(|m| m.id),
            Some(MatchId::new(0, 2))
        );
    }

    proptest! {
        #[test]
        fn prop_round_robin_covers_every_pair_once(n in 2usize..40) {
            let schedule = generate(&roster_of(n));
            prop_assert_eq!(schedule.len(), n * (n - 1) / 2);

            let pairs: HashSet<_> = schedule.iter().map(|m| m.id).collect();
            prop_assert_eq!(pairs.len(), schedule.len());

            for team in 0..n {
                let appearances = schedule.iter().filter(|m| m.involves(TeamId(team))).count();
                prop_assert_eq!(appearances, n - 1);
            }
        }

        #[test]
        fn prop_schedule_is_stable_and_sorted(n in 2usize..30) {
            let a = generate(&roster_of(n));
            let b = generate(&roster_of(n));
            prop_assert_eq!(&a, &b);
            prop_assert!(a.matches().windows(2).all(|w| w[0].id < w[1].id));
        }
    }
}

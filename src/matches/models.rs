//! Match data models and bracket-tree position math.
//!
//! Tree encoding: `level` is bracket depth (0 = final) and `match_number` is
//! the position within the tree. The parent of `(level, number)` sits at
//! `(level - 1, number / 2)`; an even-numbered child feeds the parent's
//! `team_a` slot, an odd-numbered child the `team_b` slot. Numbers at each
//! level form a contiguous range starting at `2^level`, which makes the final
//! always match number 1.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tournament::{TeamId, TournamentId, UserId};

/// Match ID type
pub type MatchId = i64;

/// Match number of the level-0 final
pub const FINAL_MATCH_NUMBER: u32 = 1;

/// Match state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Waiting for participants or a result
    Pending,
    /// Result recorded (or bye, which completes at creation)
    Completed,
    /// Cancelled along with its tournament
    Cancelled,
}

/// Parent slot a child match feeds into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    TeamA,
    TeamB,
}

/// Position of the parent of `(level, number)`, or `None` for the final.
pub fn parent_of(level: u32, number: u32) -> Option<(u32, u32)> {
    (level > 0).then(|| (level - 1, number / 2))
}

/// Parent slot fed by the match at `number`: even numbers advance into
/// `team_a`, odd numbers into `team_b`.
pub fn slot_of(number: u32) -> Slot {
    if number % 2 == 0 { Slot::TeamA } else { Slot::TeamB }
}

/// A persisted bracket match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// Bracket depth; 0 is the final, higher values are earlier rounds
    pub level: u32,
    /// Position within the tree, unique per tournament
    pub match_number: u32,
    /// `None` until propagation fills the slot (or the absent side of a bye)
    pub team_a_id: Option<TeamId>,
    pub team_b_id: Option<TeamId>,
    /// Both scores set or both unset
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// One of the participants, set on completion
    pub winner_id: Option<TeamId>,
    pub best_player_id: Option<UserId>,
    /// Referee who recorded the result
    pub recorded_by_referee_id: Option<UserId>,
    /// Automatic advancement: `team_a` set, `team_b` absent
    pub is_bye: bool,
    pub status: MatchStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Match {
    /// Whether both team slots are filled
    pub fn has_both_teams(&self) -> bool {
        self.team_a_id.is_some() && self.team_b_id.is_some()
    }

    /// Whether this is the level-0 final
    pub fn is_final(&self) -> bool {
        self.level == 0
    }

    /// Position of the match this one's winner advances into
    pub fn parent_position(&self) -> Option<(u32, u32)> {
        parent_of(self.level, self.match_number)
    }

    /// Which parent slot this match's winner lands in
    pub fn parent_slot(&self) -> Slot {
        slot_of(self.match_number)
    }
}

/// The full set of matches of one tournament, ordered by match number.
///
/// Provides the groupings the presentation layer renders: levels from the
/// earliest round down to the final, each level's matches by number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    matches: Vec<Match>,
}

impl MatchSet {
    /// Wrap a set of matches, normalizing order to match number ascending
    pub fn new(mut matches: Vec<Match>) -> Self {
        matches.sort_by_key(|m| m.match_number);
        Self { matches }
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

    pub fn into_vec(self) -> Vec<Match> {
        self.matches
    }

    /// Match at an exact tree position
    pub fn at(&self, level: u32, number: u32) -> Option<&Match> {
        self.matches
            .iter()
            .find(|m| m.level == level && m.match_number == number)
    }

    /// Matches grouped by level, deepest (earliest round) first, each level
    /// ordered by match number ascending.
    pub fn by_level(&self) -> Vec<(u32, Vec<&Match>)> {
        let mut grouped: BTreeMap<u32, Vec<&Match>> = BTreeMap::new();
        for m in &self.matches {
            grouped.entry(m.level).or_default().push(m);
        }
        grouped.into_iter().rev().collect()
    }

    /// The level-0 final
    pub fn final_match(&self) -> Option<&Match> {
        self.matches.iter().find(|m| m.is_final())
    }

    /// Winner of a completed final
    pub fn champion(&self) -> Option<TeamId> {
        self.final_match()
            .filter(|m| m.status == MatchStatus::Completed)
            .and_then(|m| m.winner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_at(level: u32, number: u32) -> Match {
        Match {
            id: number as MatchId,
            tournament_id: 1,
            level,
            match_number: number,
            team_a_id: None,
            team_b_id: None,
            score_a: None,
            score_b: None,
            winner_id: None,
            best_player_id: None,
            recorded_by_referee_id: None,
            is_bye: false,
            status: MatchStatus::Pending,
            completed_at: None,
        }
    }

    #[test]
    fn test_parent_position() {
        assert_eq!(parent_of(0, 1), None);
        assert_eq!(parent_of(1, 2), Some((0, 1)));
        assert_eq!(parent_of(1, 3), Some((0, 1)));
        assert_eq!(parent_of(2, 6), Some((1, 3)));
        assert_eq!(parent_of(2, 7), Some((1, 3)));
    }

    #[test]
    fn test_parent_slot_parity() {
        assert_eq!(slot_of(4), Slot::TeamA);
        assert_eq!(slot_of(5), Slot::TeamB);
        assert_eq!(slot_of(6), Slot::TeamA);
        assert_eq!(slot_of(7), Slot::TeamB);
    }

    #[test]
    fn test_match_set_ordering_and_grouping() {
        let set = MatchSet::new(vec![
            match_at(0, 1),
            match_at(2, 7),
            match_at(1, 2),
            match_at(2, 4),
            match_at(1, 3),
            match_at(2, 5),
            match_at(2, 6),
        ]);

        let numbers: Vec<u32> = set.iter().map(|m| m.match_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);

        let by_level = set.by_level();
        assert_eq!(by_level.len(), 3);
        assert_eq!(by_level[0].0, 2);
        assert_eq!(by_level[2].0, 0);
        let deepest: Vec<u32> = by_level[0].1.iter().map(|m| m.match_number).collect();
        assert_eq!(deepest, vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_champion_requires_completed_final() {
        let mut final_match = match_at(0, 1);
        final_match.team_a_id = Some(10);
        final_match.team_b_id = Some(20);
        let set = MatchSet::new(vec![final_match.clone()]);
        assert_eq!(set.champion(), None);

        final_match.status = MatchStatus::Completed;
        final_match.winner_id = Some(20);
        let set = MatchSet::new(vec![final_match]);
        assert_eq!(set.champion(), Some(20));
    }
}

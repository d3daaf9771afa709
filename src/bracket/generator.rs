//! Bracket generation: the complete match tree for a tournament about to
//! start.

use log::info;
use serde::{Deserialize, Serialize};

use super::seeding::seed;
use super::sizing::{MIN_TEAMS, bracket_size};
use crate::errors::{BracketError, BracketResult};
use crate::matches::{MatchStatus, Slot, parent_of, slot_of};
use crate::tournament::{Team, TeamId};

/// An unpersisted match produced by generation. Distinct from the stored
/// [`Match`](crate::matches::Match): drafts carry no identity or timestamps
/// until the store materializes them in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDraft {
    pub level: u32,
    pub match_number: u32,
    pub team_a_id: Option<TeamId>,
    pub team_b_id: Option<TeamId>,
    pub winner_id: Option<TeamId>,
    pub is_bye: bool,
    pub status: MatchStatus,
}

impl MatchDraft {
    /// Automatic win: the seeded team advances without an opponent
    fn bye(level: u32, match_number: u32, team: TeamId) -> Self {
        Self {
            level,
            match_number,
            team_a_id: Some(team),
            team_b_id: None,
            winner_id: Some(team),
            is_bye: true,
            status: MatchStatus::Completed,
        }
    }

    /// Regular pairing awaiting a result
    fn pairing(level: u32, match_number: u32, team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            level,
            match_number,
            team_a_id: Some(team_a),
            team_b_id: Some(team_b),
            winner_id: None,
            is_bye: false,
            status: MatchStatus::Pending,
        }
    }

    /// Later-round match whose slots are filled by propagation
    fn empty(level: u32, match_number: u32) -> Self {
        Self {
            level,
            match_number,
            team_a_id: None,
            team_b_id: None,
            winner_id: None,
            is_bye: false,
            status: MatchStatus::Pending,
        }
    }
}

/// Generate the full single-elimination tree for the given teams.
///
/// Teams are seeded by score; the `byes` highest seeds complete immediately
/// at the deepest level, the rest pair off consecutively in seed order, and
/// every shallower level is created empty down to the single final. Bye
/// winners are carried into their parent slots here, since a completed bye
/// will never pass through result recording.
///
/// The returned drafts are sorted by match number ascending.
pub fn generate(teams: Vec<Team>) -> BracketResult<Vec<MatchDraft>> {
    if teams.len() < MIN_TEAMS {
        return Err(BracketError::InsufficientTeams {
            needed: MIN_TEAMS,
            current: teams.len(),
        });
    }
    let sizing = bracket_size(teams.len())?;
    let seeded = seed(teams);
    let deepest = sizing.deepest_level();
    let byes = sizing.byes as usize;

    let mut drafts: Vec<MatchDraft> = Vec::with_capacity(sizing.size as usize - 1);

    // Initial round: byes first so the highest seeds land in the lowest
    // match numbers, then consecutive pairings for everyone else.
    let mut number = 1u32 << deepest;
    for team in &seeded[..byes] {
        drafts.push(MatchDraft::bye(deepest, number, team.id));
        number += 1;
    }
    // size = teams + byes, so the non-bye remainder is always even.
    debug_assert_eq!((seeded.len() - byes) % 2, 0);
    for pair in seeded[byes..].chunks_exact(2) {
        drafts.push(MatchDraft::pairing(deepest, number, pair[0].id, pair[1].id));
        number += 1;
    }

    // Later rounds are created empty; propagation fills them as results come in.
    for level in (0..deepest).rev() {
        let base = 1u32 << level;
        for offset in 0..base {
            drafts.push(MatchDraft::empty(level, base + offset));
        }
    }

    for bye_index in 0..byes {
        let bye_number = drafts[bye_index].match_number;
        let winner = drafts[bye_index].winner_id;
        if let Some((parent_level, parent_number)) = parent_of(deepest, bye_number) {
            let parent = drafts
                .iter_mut()
                .find(|d| d.level == parent_level && d.match_number == parent_number);
            if let Some(parent) = parent {
                match slot_of(bye_number) {
                    Slot::TeamA => parent.team_a_id = winner,
                    Slot::TeamB => parent.team_b_id = winner,
                }
            }
        }
    }

    drafts.sort_by_key(|d| d.match_number);
    info!(
        "generated bracket: {} teams, size {}, {} byes, {} rounds",
        seeded.len(),
        sizing.size,
        sizing.byes,
        sizing.rounds()
    );
    Ok(drafts)
}

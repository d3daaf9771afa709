//! Result recording and winner propagation.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::models::{Match, MatchId, MatchStatus};
use crate::errors::{BracketError, BracketResult};
use crate::store::{BracketStore, SlotAssignment, StoreError};
use crate::tournament::{Tournament, TournamentStatus, UserId};

/// Non-fatal inconsistency: a match completed but the parent its winner
/// should advance into does not exist. The result is committed anyway; this
/// is surfaced so operators can repair the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationWarning {
    pub match_id: MatchId,
    /// Position where the parent was expected
    pub parent_level: u32,
    pub parent_number: u32,
}

impl fmt::Display for PropagationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no parent match at level {}, number {} for completed match {}",
            self.parent_level, self.parent_number, self.match_id
        )
    }
}

/// Outcome of a successful [`MatchResolver::record_result`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedResult {
    /// The completed match as committed
    pub updated: Match,
    /// Set when the winner had no parent match to advance into
    pub warning: Option<PropagationWarning>,
}

/// Pure edit gate. A match takes a result only while: both team slots are
/// filled and it is not a bye, its tournament is in progress, it is still
/// pending (completed results are frozen, cancelled matches stay cancelled),
/// and its parent has not consumed a winner yet.
pub fn can_edit(
    record: &Match,
    parent_status: Option<MatchStatus>,
    tournament_status: TournamentStatus,
) -> bool {
    if !record.has_both_teams() || record.is_bye {
        return false;
    }
    if tournament_status != TournamentStatus::InProgress {
        return false;
    }
    if record.status != MatchStatus::Pending {
        return false;
    }
    if parent_status == Some(MatchStatus::Completed) {
        return false;
    }
    true
}

/// Records match results and propagates winners up the tree.
///
/// Authorization is a precondition: callers verify the acting user against
/// [`Tournament::has_referee`] before recording; the resolver only stores the
/// attribution.
#[derive(Clone)]
pub struct MatchResolver {
    store: Arc<dyn BracketStore>,
}

impl MatchResolver {
    /// Create a resolver over a store
    pub fn new(store: Arc<dyn BracketStore>) -> Self {
        Self { store }
    }

    /// Whether a result may currently be recorded for the match. Missing
    /// matches and load failures answer `false`; this is a gate, not an
    /// error surface.
    pub async fn can_edit_match(&self, match_id: MatchId) -> bool {
        match self.load_edit_context(match_id).await {
            Ok((record, parent, tournament)) => can_edit(
                &record,
                parent.map(|p| p.status),
                tournament.status,
            ),
            Err(_) => false,
        }
    }

    /// Record a result: set scores, determine the winner, complete the match
    /// and advance the winner into the parent slot, all in one transaction.
    ///
    /// Fails with [`BracketError::NotEditable`] when the gate rejects the
    /// match (including when a concurrent writer commits first),
    /// [`BracketError::InvalidResult`] on a draw, and
    /// [`BracketError::MatchNotFound`] when the match does not exist. A
    /// missing parent does not fail the call; the committed result carries a
    /// [`PropagationWarning`] instead.
    pub async fn record_result(
        &self,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
        best_player_id: Option<UserId>,
        recorded_by: UserId,
    ) -> BracketResult<RecordedResult> {
        let (mut record, parent, tournament) = self.load_edit_context(match_id).await?;
        if !can_edit(&record, parent.as_ref().map(|p| p.status), tournament.status) {
            return Err(BracketError::NotEditable(match_id));
        }
        if score_a == score_b {
            return Err(BracketError::InvalidResult { score_a, score_b });
        }

        // Gate guarantees both participants are present.
        let winner_id = if score_a > score_b {
            record.team_a_id
        } else {
            record.team_b_id
        };
        record.score_a = Some(score_a);
        record.score_b = Some(score_b);
        record.winner_id = winner_id;
        record.best_player_id = best_player_id;
        record.recorded_by_referee_id = Some(recorded_by);
        record.status = MatchStatus::Completed;
        record.completed_at = Some(Utc::now());

        // The advancement names only this match's slot of the parent, so a
        // sibling result committing concurrently can never be overwritten
        // with a stale parent copy.
        let advancement = record.parent_position().zip(winner_id).map(
            |((parent_level, parent_number), team)| SlotAssignment {
                level: parent_level,
                number: parent_number,
                slot: record.parent_slot(),
                team,
            },
        );

        let parent_found = match self.store.save_match_result(record.clone(), advancement).await {
            Ok(found) => found,
            // Lost the race: another writer settled this match or its parent.
            Err(StoreError::Conflict(_)) => return Err(BracketError::NotEditable(match_id)),
            Err(e) => return Err(e.into()),
        };

        let mut warning = None;
        if let Some(assignment) = advancement {
            if parent_found {
                debug!(
                    "match {match_id} winner {} advances to level {}, match {}",
                    assignment.team, assignment.level, assignment.number
                );
            } else {
                let missing = PropagationWarning {
                    match_id,
                    parent_level: assignment.level,
                    parent_number: assignment.number,
                };
                warn!("{missing}");
                warning = Some(missing);
            }
        }

        Ok(RecordedResult {
            updated: record,
            warning,
        })
    }

    async fn load_edit_context(
        &self,
        match_id: MatchId,
    ) -> BracketResult<(Match, Option<Match>, Tournament)> {
        let record = self.store.load_match(match_id).await?;
        let tournament = self.store.load_tournament(record.tournament_id).await?;
        let parent = match record.parent_position() {
            Some((level, number)) => {
                self.store
                    .load_match_by_position(record.tournament_id, level, number)
                    .await?
            }
            None => None,
        };
        Ok((record, parent, tournament))
    }
}

//! Tournament state transitions.

use std::sync::Arc;

use log::info;

use super::models::{TournamentId, TournamentStatus};
use crate::bracket::generate;
use crate::errors::{BracketError, BracketResult};
use crate::matches::{FINAL_MATCH_NUMBER, MatchSet, MatchStatus};
use crate::store::{BracketStore, StoreError};

/// Orchestrates the tournament state machine:
/// `RegistrationOpen -> InProgress -> {Completed, Cancelled}`, with
/// cancellation also allowed straight from registration. Terminal states
/// admit no further transition.
#[derive(Clone)]
pub struct TournamentLifecycle {
    store: Arc<dyn BracketStore>,
}

impl TournamentLifecycle {
    /// Create a lifecycle manager over a store
    pub fn new(store: Arc<dyn BracketStore>) -> Self {
        Self { store }
    }

    /// Start a tournament: generate the bracket from the registered teams
    /// and commit it together with the `InProgress` transition in one
    /// exclusive transaction, so a partial bracket is never visible.
    ///
    /// Fails with [`BracketError::InvalidState`] unless the tournament is in
    /// `RegistrationOpen`, and [`BracketError::InsufficientTeams`] below two
    /// teams.
    pub async fn start(&self, tournament_id: TournamentId) -> BracketResult<MatchSet> {
        let tournament = self.store.load_tournament(tournament_id).await?;
        if tournament.status != TournamentStatus::RegistrationOpen {
            return Err(BracketError::InvalidState {
                expected: TournamentStatus::RegistrationOpen,
                actual: tournament.status,
            });
        }

        let teams = self.store.load_teams(tournament_id).await?;
        let team_count = teams.len();
        let drafts = generate(teams)?;

        match self.store.insert_bracket(tournament_id, drafts).await {
            Ok(matches) => {
                info!(
                    "tournament {tournament_id} started: {team_count} teams, {} matches",
                    matches.len()
                );
                Ok(MatchSet::new(matches))
            }
            // Someone else moved the tournament between our check and the
            // commit; report the state they left behind.
            Err(StoreError::Conflict(_)) => {
                let actual = self
                    .store
                    .load_tournament(tournament_id)
                    .await
                    .map(|t| t.status)
                    .unwrap_or(tournament.status);
                Err(BracketError::InvalidState {
                    expected: TournamentStatus::RegistrationOpen,
                    actual,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Cancel a tournament that has not finished: every pending match is
    /// cancelled with it in the same transaction, completed matches keep
    /// their results.
    pub async fn cancel(&self, tournament_id: TournamentId) -> BracketResult<()> {
        let tournament = self.store.load_tournament(tournament_id).await?;
        if tournament.status.is_terminal() {
            return Err(BracketError::InvalidState {
                expected: TournamentStatus::InProgress,
                actual: tournament.status,
            });
        }

        match self.store.cancel_tournament(tournament_id).await {
            Ok(cascade) => {
                info!("tournament {tournament_id} cancelled, {cascade} pending matches cancelled");
                Ok(())
            }
            // A racing cancel (or completion) got there first; report the
            // terminal state it left behind.
            Err(StoreError::Conflict(_)) => {
                let actual = self
                    .store
                    .load_tournament(tournament_id)
                    .await
                    .map(|t| t.status)
                    .unwrap_or(tournament.status);
                Err(BracketError::InvalidState {
                    expected: TournamentStatus::InProgress,
                    actual,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Terminal transition observed by the caller once the final is decided.
    /// Result recording never flips the tournament itself; the workflow that
    /// watches the level-0 match calls this.
    ///
    /// Fails with [`BracketError::InvalidState`] unless the tournament is in
    /// progress, and [`BracketError::FinalNotCompleted`] while the final has
    /// no recorded result.
    pub async fn complete(&self, tournament_id: TournamentId) -> BracketResult<()> {
        let tournament = self.store.load_tournament(tournament_id).await?;
        if tournament.status != TournamentStatus::InProgress {
            return Err(BracketError::InvalidState {
                expected: TournamentStatus::InProgress,
                actual: tournament.status,
            });
        }

        let final_match = self
            .store
            .load_match_by_position(tournament_id, 0, FINAL_MATCH_NUMBER)
            .await?;
        let champion = match final_match {
            Some(record) if record.status == MatchStatus::Completed => record.winner_id,
            _ => return Err(BracketError::FinalNotCompleted(tournament_id)),
        };

        self.store
            .save_tournament_status(
                tournament_id,
                TournamentStatus::InProgress,
                TournamentStatus::Completed,
            )
            .await?;
        info!("tournament {tournament_id} completed, champion {champion:?}");
        Ok(())
    }
}

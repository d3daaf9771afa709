//! Engine-wide error types.

use thiserror::Error;

use crate::matches::MatchId;
use crate::store::StoreError;
use crate::tournament::{TournamentId, TournamentStatus};

/// Errors returned by bracket engine operations
#[derive(Debug, Error)]
pub enum BracketError {
    /// Bad arguments (team count below minimum, max_teams not a power of two, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not legal for the tournament's current status
    #[error("Tournament not in correct state: expected {expected:?}, got {actual:?}")]
    InvalidState {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    /// Too few teams to generate a bracket
    #[error("Insufficient teams: need {needed}, have {current}")]
    InsufficientTeams { needed: usize, current: usize },

    /// Draws are not allowed in single elimination
    #[error("Invalid result: draws are not allowed ({score_a}-{score_b})")]
    InvalidResult { score_a: u32, score_b: u32 },

    /// The edit gate rejected the match
    #[error("Match {0} cannot be edited")]
    NotEditable(MatchId),

    /// The final has not been played to completion yet
    #[error("Final match is missing or not completed for tournament {0}")]
    FinalNotCompleted(TournamentId),

    /// Tournament not found
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    /// Match not found
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Storage failure outside the engine's control
    #[error("Storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for BracketError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TournamentNotFound(id) => BracketError::TournamentNotFound(id),
            StoreError::MatchNotFound(id) => BracketError::MatchNotFound(id),
            other => BracketError::Store(other),
        }
    }
}

/// Result type for bracket engine operations
pub type BracketResult<T> = Result<T, BracketError>;

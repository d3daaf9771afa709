//! Storage seam consumed by the engine.
//!
//! The engine never talks to a concrete database; it goes through
//! [`BracketStore`], a trait-based abstraction that keeps the bracket logic
//! testable and lets embedders inject their own persistence. Implementations
//! must honor the transactional contract documented on each method: a call
//! either applies completely or not at all, and the conflict rules below are
//! what serialize concurrent writers.
//!
//! [`memory::MemoryStore`] is the bundled implementation used by the test
//! suite and by embedders that do not need durability.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::bracket::MatchDraft;
use crate::matches::{Match, MatchId, Slot};
use crate::tournament::{Team, TeamId, Tournament, TournamentId, TournamentStatus};

/// Advancement of a winner into one slot of the match at a tree position,
/// carried alongside a committed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    pub level: u32,
    pub number: u32,
    pub slot: Slot,
    pub team: TeamId,
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Tournament not found
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    /// Match not found
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// A compare-and-swap guard failed: the targeted row changed underneath
    /// the caller
    #[error("Conflicting write: {0}")]
    Conflict(String),

    /// Backend failure (connection loss, poisoned lock, ...)
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Transactional repository the bracket engine runs against.
///
/// Every method is atomic in isolation. The write methods double as the
/// engine's concurrency control: `insert_bracket` is the exclusive start
/// transaction, `save_match_result` commits a result and its slot-targeted
/// advancement together, and `cancel_tournament` runs the cancellation
/// cascade with the terminal flip. Writers refuse rows that are no longer
/// pending, so a second writer racing on the same match loses with
/// [`StoreError::Conflict`] instead of silently overwriting the first.
#[async_trait]
pub trait BracketStore: Send + Sync {
    /// Load a tournament by id
    async fn load_tournament(&self, id: TournamentId) -> StoreResult<Tournament>;

    /// Load a tournament's teams in registration order
    async fn load_teams(&self, tournament_id: TournamentId) -> StoreResult<Vec<Team>>;

    /// Load all matches of a tournament, ordered by match number
    async fn load_matches(&self, tournament_id: TournamentId) -> StoreResult<Vec<Match>>;

    /// Load a match by id
    async fn load_match(&self, id: MatchId) -> StoreResult<Match>;

    /// Load the match at an exact tree position, if it exists
    async fn load_match_by_position(
        &self,
        tournament_id: TournamentId,
        level: u32,
        number: u32,
    ) -> StoreResult<Option<Match>>;

    /// Materialize a freshly generated bracket and move the tournament from
    /// `RegistrationOpen` to `InProgress`, all in one transaction. Fails with
    /// [`StoreError::Conflict`] when the tournament is no longer open or
    /// already holds matches, leaving nothing behind.
    async fn insert_bracket(
        &self,
        tournament_id: TournamentId,
        drafts: Vec<MatchDraft>,
    ) -> StoreResult<Vec<Match>>;

    /// Apply a batch of match updates atomically. Every targeted row must
    /// still be `Pending` in the store; otherwise the whole batch fails with
    /// [`StoreError::Conflict`] and no row changes. General repair surface
    /// for embedders; result recording goes through [`save_match_result`]
    /// instead.
    ///
    /// [`save_match_result`]: BracketStore::save_match_result
    async fn save_matches(&self, batch: Vec<Match>) -> StoreResult<()>;

    /// Commit a completed match together with the advancement of its winner
    /// into one slot of the parent, in one transaction. Only the named slot
    /// of the parent changes; the sibling's slot is read-modify-write free,
    /// so results for both children of one parent may commit concurrently.
    ///
    /// Fails with [`StoreError::Conflict`] when the result row is no longer
    /// `Pending` or the parent has already settled, leaving nothing behind.
    /// Returns `false` when `advancement` names a position with no match;
    /// the result itself still commits.
    async fn save_match_result(
        &self,
        updated: Match,
        advancement: Option<SlotAssignment>,
    ) -> StoreResult<bool>;

    /// Cancel a tournament and cascade every still-pending match of it to
    /// `Cancelled`, in one transaction. Fails with [`StoreError::Conflict`]
    /// when the tournament is already terminal, leaving every row untouched.
    /// Returns the number of matches cancelled by the cascade.
    async fn cancel_tournament(&self, id: TournamentId) -> StoreResult<usize>;

    /// Compare-and-swap the tournament status: applies `to` only while the
    /// stored status equals `from`.
    async fn save_tournament_status(
        &self,
        id: TournamentId,
        from: TournamentStatus,
        to: TournamentStatus,
    ) -> StoreResult<()>;
}

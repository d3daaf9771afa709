//! # Bracket Engine
//!
//! A single-elimination tournament bracket engine: seeding, bye assignment,
//! match-tree generation, and result propagation up the tree.
//!
//! ## Architecture
//!
//! The bracket is a binary tree encoded in two integers per match: `level`
//! (0 = final, higher = earlier rounds) and `match_number` (contiguous from
//! `2^level` within each level). The parent of `(level, number)` is
//! `(level - 1, number / 2)`, and a winner lands in the parent's `team_a`
//! slot when its number is even, `team_b` when odd. That arithmetic drives
//! both generation and propagation; no pointers are stored.
//!
//! Pure computation (sizing, seeding, generation, the edit gate) is kept
//! separate from orchestration: [`TournamentLifecycle`] and [`MatchResolver`]
//! run the pure pieces against a [`BracketStore`], the transactional
//! repository seam behind which any persistence can sit. HTTP, sessions, and
//! notification delivery are the embedder's concern.
//!
//! ## Core Modules
//!
//! - [`bracket`]: bracket sizing, seeding, and match-tree generation
//! - [`matches`]: match records, tree position math, result resolution
//! - [`tournament`]: tournament/team models and the lifecycle state machine
//! - [`store`]: the repository trait plus the in-memory implementation
//!
//! ## Example
//!
//! ```no_run
//! use bracket_engine::{MatchResolver, MemoryStore, TournamentLifecycle};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let tournament = store.create_tournament("City Open", 8)?;
//!     for (name, score) in [("Rockets", 100), ("Comets", 90), ("Meteors", 80)] {
//!         store.add_team(tournament.id, name, score)?;
//!     }
//!
//!     let lifecycle = TournamentLifecycle::new(store.clone());
//!     let bracket = lifecycle.start(tournament.id).await?;
//!     for (level, round) in bracket.by_level() {
//!         println!("round at level {level}: {} matches", round.len());
//!     }
//!
//!     let resolver = MatchResolver::new(store);
//!     let playable = bracket.at(1, 3).expect("pairing exists");
//!     let outcome = resolver.record_result(playable.id, 3, 1, None, 42).await?;
//!     println!("winner: {:?}", outcome.updated.winner_id);
//!
//!     Ok(())
//! }
//! ```

/// Engine-wide error types.
pub mod errors;
pub use errors::{BracketError, BracketResult};

/// Bracket sizing, seeding, and match-tree generation.
pub mod bracket;
pub use bracket::{BracketSize, MatchDraft, bracket_size, generate, seed};

/// Match records, tree position math, and result resolution.
pub mod matches;
pub use matches::{
    Match, MatchId, MatchResolver, MatchSet, MatchStatus, PropagationWarning, RecordedResult,
};

/// Tournament models and the lifecycle state machine.
pub mod tournament;
pub use tournament::{
    Team, TeamId, Tournament, TournamentId, TournamentLifecycle, TournamentStatus, UserId,
};

/// Storage seam: repository trait and the in-memory implementation.
pub mod store;
pub use store::{BracketStore, SlotAssignment, StoreError, StoreResult, memory::MemoryStore};

//! Tournament module: data models and the lifecycle state machine.
//!
//! This module provides:
//! - Tournament and team records with their status enums
//! - The `RegistrationOpen -> InProgress -> {Completed, Cancelled}` state
//!   machine, including the pending-match cascade on cancellation
//! - The explicit `complete` transition for the workflow that observes the
//!   final match
//!
//! ## Example
//!
//! ```no_run
//! use bracket_engine::{MemoryStore, TournamentLifecycle};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let tournament = store.create_tournament("City Open", 8)?;
//!     store.add_team(tournament.id, "Rockets", 100)?;
//!     store.add_team(tournament.id, "Comets", 90)?;
//!
//!     let lifecycle = TournamentLifecycle::new(store.clone());
//!     let bracket = lifecycle.start(tournament.id).await?;
//!     println!("{} matches generated", bracket.len());
//!
//!     Ok(())
//! }
//! ```

pub mod lifecycle;
pub mod models;

pub use lifecycle::TournamentLifecycle;
pub use models::{Team, TeamId, Tournament, TournamentId, TournamentStatus, UserId};

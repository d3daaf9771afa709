//! Match module: match records, tree position math, and result resolution.
//!
//! This module provides:
//! - The persisted [`Match`] record and [`MatchSet`] bracket view
//! - Parent/slot math for the binary tree encoded in match numbers
//! - [`MatchResolver`]: the edit gate and atomic result recording with
//!   winner propagation
//!
//! ## Example
//!
//! ```no_run
//! use bracket_engine::{MatchResolver, MemoryStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let resolver = MatchResolver::new(store);
//!
//!     if resolver.can_edit_match(7).await {
//!         let outcome = resolver.record_result(7, 3, 1, None, 42).await?;
//!         println!("winner: {:?}", outcome.updated.winner_id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod resolver;

pub use models::{
    FINAL_MATCH_NUMBER, Match, MatchId, MatchSet, MatchStatus, Slot, parent_of, slot_of,
};
pub use resolver::{MatchResolver, PropagationWarning, RecordedResult, can_edit};

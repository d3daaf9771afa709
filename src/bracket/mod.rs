//! Bracket construction: sizing, seeding, and tree generation.
//!
//! The pieces compose bottom-up:
//! - [`bracket_size`] computes the power-of-two bracket and bye count
//! - [`seed`] orders teams by seed score, ties by registration order
//! - [`generate`] builds the full match tree as [`MatchDraft`] values, byes
//!   resolved and their winners already advanced into parent slots
//!
//! All of it is pure computation; persistence and state gating live in the
//! lifecycle layer.

pub mod generator;
pub mod seeding;
pub mod sizing;

pub use generator::{MatchDraft, generate};
pub use seeding::seed;
pub use sizing::{BracketSize, MAX_TEAMS, MIN_TEAMS, bracket_size};

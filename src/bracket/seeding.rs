//! Team seeding order for bracket placement.

use crate::tournament::Team;

/// Order teams by `seed_score` descending. The sort is stable, so teams with
/// equal scores keep their registration order and generation stays
/// reproducible.
pub fn seed(mut teams: Vec<Team>) -> Vec<Team> {
    teams.sort_by(|a, b| b.seed_score.cmp(&a.seed_score));
    teams
}

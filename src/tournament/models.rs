//! Tournament and team data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BracketError, BracketResult};

/// Tournament ID type
pub type TournamentId = i64;

/// Team ID type
pub type TeamId = i64;

/// User ID type (referees, best players)
pub type UserId = i64;

/// Tournament state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStatus {
    /// Accepting team registrations
    RegistrationOpen,
    /// Bracket generated, matches being played
    InProgress,
    /// Final match decided
    Completed,
    /// Tournament cancelled
    Cancelled,
}

impl TournamentStatus {
    /// Whether no further transition is allowed out of this status
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Legal transitions: RegistrationOpen -> InProgress | Cancelled,
    /// InProgress -> Completed | Cancelled.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::RegistrationOpen, Self::InProgress)
                | (Self::RegistrationOpen, Self::Cancelled)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Cancelled)
        )
    }
}

/// A team registered in a tournament. Teams belong to exactly one tournament
/// and are frozen once it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub name: String,
    /// Ranking value used to order teams before bracket placement.
    /// Recomputed by the roster layer whenever team membership changes.
    pub seed_score: u32,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a team record
    pub fn new(id: TeamId, tournament_id: TournamentId, name: String, seed_score: u32) -> Self {
        Self {
            id,
            tournament_id,
            name,
            seed_score,
            created_at: Utc::now(),
        }
    }
}

/// Tournament record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Bracket capacity; must be a power of two
    pub max_teams: u32,
    pub status: TournamentStatus,
    /// Users allowed to record results. Authorization against this list is
    /// the caller's responsibility; the engine only exposes the lookup.
    pub referee_ids: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create a tournament in `RegistrationOpen` with no referees.
    ///
    /// Fails with [`BracketError::InvalidInput`] when `max_teams` is not a
    /// power of two or is below the two-team minimum.
    pub fn new(id: TournamentId, name: String, max_teams: u32) -> BracketResult<Self> {
        if max_teams < 2 || !max_teams.is_power_of_two() {
            return Err(BracketError::InvalidInput(format!(
                "max_teams must be a power of two >= 2, got {max_teams}"
            )));
        }
        Ok(Self {
            id,
            name,
            max_teams,
            status: TournamentStatus::RegistrationOpen,
            referee_ids: Vec::new(),
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        })
    }

    /// Whether the user is assigned as a referee of this tournament
    pub fn has_referee(&self, user_id: UserId) -> bool {
        self.referee_ids.contains(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminality() {
        assert!(!TournamentStatus::RegistrationOpen.is_terminal());
        assert!(!TournamentStatus::InProgress.is_terminal());
        assert!(TournamentStatus::Completed.is_terminal());
        assert!(TournamentStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        use TournamentStatus::*;
        assert!(RegistrationOpen.can_transition_to(InProgress));
        assert!(RegistrationOpen.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));

        assert!(!RegistrationOpen.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(RegistrationOpen));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(InProgress));
    }

    #[test]
    fn test_max_teams_must_be_power_of_two() {
        assert!(Tournament::new(1, "ok".to_string(), 8).is_ok());
        assert!(Tournament::new(1, "ok".to_string(), 2).is_ok());

        for bad in [0, 1, 3, 6, 12] {
            let err = Tournament::new(1, "bad".to_string(), bad).unwrap_err();
            assert!(matches!(err, BracketError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_has_referee() {
        let mut tournament = Tournament::new(1, "Open".to_string(), 8).unwrap();
        tournament.referee_ids.push(42);
        assert!(tournament.has_referee(42));
        assert!(!tournament.has_referee(7));
    }
}

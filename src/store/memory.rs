//! In-memory [`BracketStore`] implementation.
//!
//! Backs the test suite and embedders that do not need durability. A single
//! mutex guards the whole state, so every trait method is one critical
//! section and the transactional contract holds trivially: batches apply
//! under the lock or fail before touching anything.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{BracketStore, SlotAssignment, StoreError, StoreResult};
use crate::bracket::MatchDraft;
use crate::errors::{BracketError, BracketResult};
use crate::matches::{Match, MatchId, MatchStatus, Slot};
use crate::tournament::{Team, TeamId, Tournament, TournamentId, TournamentStatus, UserId};

#[derive(Debug, Default)]
struct State {
    tournaments: HashMap<TournamentId, Tournament>,
    teams: HashMap<TournamentId, Vec<Team>>,
    matches: HashMap<MatchId, Match>,
    next_tournament_id: TournamentId,
    next_team_id: TeamId,
    next_match_id: MatchId,
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| StoreError::Backend(format!("state lock poisoned: {e}")))
    }

    /// Create a tournament in `RegistrationOpen`. Fixture/embedding helper,
    /// not part of [`BracketStore`].
    pub fn create_tournament(&self, name: &str, max_teams: u32) -> BracketResult<Tournament> {
        let mut state = self.lock()?;
        state.next_tournament_id += 1;
        let tournament = Tournament::new(state.next_tournament_id, name.to_string(), max_teams)?;
        state.tournaments.insert(tournament.id, tournament.clone());
        Ok(tournament)
    }

    /// Register a team while the tournament is open and below capacity.
    pub fn add_team(
        &self,
        tournament_id: TournamentId,
        name: &str,
        seed_score: u32,
    ) -> BracketResult<Team> {
        let mut state = self.lock()?;
        let tournament = state
            .tournaments
            .get(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        if tournament.status != TournamentStatus::RegistrationOpen {
            return Err(BracketError::InvalidState {
                expected: TournamentStatus::RegistrationOpen,
                actual: tournament.status,
            });
        }
        let registered = state.teams.get(&tournament_id).map_or(0, Vec::len);
        if registered as u32 >= tournament.max_teams {
            return Err(BracketError::InvalidInput(format!(
                "tournament {tournament_id} is full ({registered} teams)"
            )));
        }
        state.next_team_id += 1;
        let team = Team::new(state.next_team_id, tournament_id, name.to_string(), seed_score);
        state
            .teams
            .entry(tournament_id)
            .or_default()
            .push(team.clone());
        Ok(team)
    }

    /// Assign a referee to a tournament (idempotent).
    pub fn add_referee(&self, tournament_id: TournamentId, user_id: UserId) -> BracketResult<()> {
        let mut state = self.lock()?;
        let tournament = state
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        if !tournament.referee_ids.contains(&user_id) {
            tournament.referee_ids.push(user_id);
        }
        Ok(())
    }
}

#[async_trait]
impl BracketStore for MemoryStore {
    async fn load_tournament(&self, id: TournamentId) -> StoreResult<Tournament> {
        let state = self.lock()?;
        state
            .tournaments
            .get(&id)
            .cloned()
            .ok_or(StoreError::TournamentNotFound(id))
    }

    async fn load_teams(&self, tournament_id: TournamentId) -> StoreResult<Vec<Team>> {
        let state = self.lock()?;
        if !state.tournaments.contains_key(&tournament_id) {
            return Err(StoreError::TournamentNotFound(tournament_id));
        }
        Ok(state.teams.get(&tournament_id).cloned().unwrap_or_default())
    }

    async fn load_matches(&self, tournament_id: TournamentId) -> StoreResult<Vec<Match>> {
        let state = self.lock()?;
        if !state.tournaments.contains_key(&tournament_id) {
            return Err(StoreError::TournamentNotFound(tournament_id));
        }
        let mut matches: Vec<Match> = state
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.match_number);
        Ok(matches)
    }

    async fn load_match(&self, id: MatchId) -> StoreResult<Match> {
        let state = self.lock()?;
        state
            .matches
            .get(&id)
            .cloned()
            .ok_or(StoreError::MatchNotFound(id))
    }

    async fn load_match_by_position(
        &self,
        tournament_id: TournamentId,
        level: u32,
        number: u32,
    ) -> StoreResult<Option<Match>> {
        let state = self.lock()?;
        Ok(state
            .matches
            .values()
            .find(|m| {
                m.tournament_id == tournament_id && m.level == level && m.match_number == number
            })
            .cloned())
    }

    async fn insert_bracket(
        &self,
        tournament_id: TournamentId,
        drafts: Vec<MatchDraft>,
    ) -> StoreResult<Vec<Match>> {
        let mut state = self.lock()?;
        let tournament = state
            .tournaments
            .get(&tournament_id)
            .ok_or(StoreError::TournamentNotFound(tournament_id))?;
        if tournament.status != TournamentStatus::RegistrationOpen {
            return Err(StoreError::Conflict(format!(
                "tournament {tournament_id} is {:?}, not open for bracket generation",
                tournament.status
            )));
        }
        if state
            .matches
            .values()
            .any(|m| m.tournament_id == tournament_id)
        {
            return Err(StoreError::Conflict(format!(
                "tournament {tournament_id} already has a bracket"
            )));
        }

        let now = Utc::now();
        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in drafts {
            state.next_match_id += 1;
            let row = Match {
                id: state.next_match_id,
                tournament_id,
                level: draft.level,
                match_number: draft.match_number,
                team_a_id: draft.team_a_id,
                team_b_id: draft.team_b_id,
                score_a: None,
                score_b: None,
                winner_id: draft.winner_id,
                best_player_id: None,
                recorded_by_referee_id: None,
                is_bye: draft.is_bye,
                status: draft.status,
                completed_at: (draft.status == MatchStatus::Completed).then_some(now),
            };
            state.matches.insert(row.id, row.clone());
            inserted.push(row);
        }

        let tournament = state
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(StoreError::TournamentNotFound(tournament_id))?;
        tournament.status = TournamentStatus::InProgress;
        tournament.started_at = Some(now);

        inserted.sort_by_key(|m| m.match_number);
        Ok(inserted)
    }

    async fn save_matches(&self, batch: Vec<Match>) -> StoreResult<()> {
        let mut state = self.lock()?;
        for entry in &batch {
            let stored = state
                .matches
                .get(&entry.id)
                .ok_or(StoreError::MatchNotFound(entry.id))?;
            if stored.status != MatchStatus::Pending {
                return Err(StoreError::Conflict(format!(
                    "match {} is already {:?}",
                    entry.id, stored.status
                )));
            }
        }
        for entry in batch {
            state.matches.insert(entry.id, entry);
        }
        Ok(())
    }

    async fn save_match_result(
        &self,
        updated: Match,
        advancement: Option<SlotAssignment>,
    ) -> StoreResult<bool> {
        let mut state = self.lock()?;
        let stored = state
            .matches
            .get(&updated.id)
            .ok_or(StoreError::MatchNotFound(updated.id))?;
        if stored.status != MatchStatus::Pending {
            return Err(StoreError::Conflict(format!(
                "match {} is already {:?}",
                updated.id, stored.status
            )));
        }

        let tournament_id = updated.tournament_id;
        let mut parent_found = true;
        if let Some(assignment) = advancement {
            let parent = state.matches.values_mut().find(|m| {
                m.tournament_id == tournament_id
                    && m.level == assignment.level
                    && m.match_number == assignment.number
            });
            match parent {
                Some(parent) => {
                    if parent.status != MatchStatus::Pending {
                        return Err(StoreError::Conflict(format!(
                            "parent match {} is already {:?}",
                            parent.id, parent.status
                        )));
                    }
                    // Only the named slot changes; the sibling's slot is
                    // left exactly as stored.
                    match assignment.slot {
                        Slot::TeamA => parent.team_a_id = Some(assignment.team),
                        Slot::TeamB => parent.team_b_id = Some(assignment.team),
                    }
                }
                None => parent_found = false,
            }
        }

        state.matches.insert(updated.id, updated);
        Ok(parent_found)
    }

    async fn cancel_tournament(&self, id: TournamentId) -> StoreResult<usize> {
        let mut state = self.lock()?;
        let tournament = state
            .tournaments
            .get(&id)
            .ok_or(StoreError::TournamentNotFound(id))?;
        if tournament.status.is_terminal() {
            return Err(StoreError::Conflict(format!(
                "tournament {id} is already {:?}",
                tournament.status
            )));
        }

        let mut cascade = 0;
        for record in state
            .matches
            .values_mut()
            .filter(|m| m.tournament_id == id && m.status == MatchStatus::Pending)
        {
            record.status = MatchStatus::Cancelled;
            cascade += 1;
        }

        let tournament = state
            .tournaments
            .get_mut(&id)
            .ok_or(StoreError::TournamentNotFound(id))?;
        tournament.status = TournamentStatus::Cancelled;
        tournament.finished_at = Some(Utc::now());
        Ok(cascade)
    }

    async fn save_tournament_status(
        &self,
        id: TournamentId,
        from: TournamentStatus,
        to: TournamentStatus,
    ) -> StoreResult<()> {
        let mut state = self.lock()?;
        let tournament = state
            .tournaments
            .get_mut(&id)
            .ok_or(StoreError::TournamentNotFound(id))?;
        if tournament.status != from {
            return Err(StoreError::Conflict(format!(
                "tournament {id} is {:?}, expected {from:?}",
                tournament.status
            )));
        }
        tournament.status = to;
        match to {
            TournamentStatus::InProgress => tournament.started_at = Some(Utc::now()),
            TournamentStatus::Completed | TournamentStatus::Cancelled => {
                tournament.finished_at = Some(Utc::now());
            }
            TournamentStatus::RegistrationOpen => {}
        }
        Ok(())
    }
}

//! Bracket size and bye count computation.

use serde::{Deserialize, Serialize};

use crate::errors::{BracketError, BracketResult};

/// Minimum number of teams for a bracket
pub const MIN_TEAMS: usize = 2;

/// Maximum number of teams: the largest power-of-two bracket a `u32` can
/// index without `next_power_of_two` overflowing
pub const MAX_TEAMS: usize = 1 << 31;

/// Power-of-two bracket dimensions for a team count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSize {
    /// Smallest power of two holding every team
    pub size: u32,
    /// Automatic advancements needed to fill the bracket
    pub byes: u32,
}

impl BracketSize {
    /// Number of rounds, i.e. log2 of the bracket size
    pub fn rounds(self) -> u32 {
        self.size.trailing_zeros()
    }

    /// Level of the initial round (0 when only two teams)
    pub fn deepest_level(self) -> u32 {
        self.rounds() - 1
    }
}

/// Compute bracket dimensions for `team_count` teams.
///
/// Fails with [`BracketError::InvalidInput`] below [`MIN_TEAMS`] or above
/// [`MAX_TEAMS`].
pub fn bracket_size(team_count: usize) -> BracketResult<BracketSize> {
    if team_count < MIN_TEAMS {
        return Err(BracketError::InvalidInput(format!(
            "need at least {MIN_TEAMS} teams, got {team_count}"
        )));
    }
    if team_count > MAX_TEAMS {
        return Err(BracketError::InvalidInput(format!(
            "team count {team_count} exceeds the maximum bracket of {MAX_TEAMS}"
        )));
    }
    let count = u32::try_from(team_count)
        .map_err(|_| BracketError::InvalidInput(format!("team count {team_count} out of range")))?;
    let size = count.next_power_of_two();
    Ok(BracketSize {
        size,
        byes: size - count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_powers_need_no_byes() {
        for count in [2usize, 4, 8, 16, 64] {
            let sizing = bracket_size(count).unwrap();
            assert_eq!(sizing.size as usize, count);
            assert_eq!(sizing.byes, 0);
        }
    }

    #[test]
    fn test_five_teams_round_up_to_eight() {
        let sizing = bracket_size(5).unwrap();
        assert_eq!(sizing.size, 8);
        assert_eq!(sizing.byes, 3);
        assert_eq!(sizing.rounds(), 3);
        assert_eq!(sizing.deepest_level(), 2);
    }

    #[test]
    fn test_odd_counts() {
        assert_eq!(bracket_size(3).unwrap().size, 4);
        assert_eq!(bracket_size(3).unwrap().byes, 1);
        assert_eq!(bracket_size(9).unwrap().size, 16);
        assert_eq!(bracket_size(9).unwrap().byes, 7);
        assert_eq!(bracket_size(17).unwrap().size, 32);
    }

    #[test]
    fn test_two_team_bracket_is_just_the_final() {
        let sizing = bracket_size(2).unwrap();
        assert_eq!(sizing.rounds(), 1);
        assert_eq!(sizing.deepest_level(), 0);
    }

    #[test]
    fn test_below_minimum_is_invalid() {
        for count in [0usize, 1] {
            assert!(matches!(
                bracket_size(count),
                Err(BracketError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_counts_beyond_the_cap_are_invalid() {
        let sizing = bracket_size(MAX_TEAMS).unwrap();
        assert_eq!(sizing.size as usize, MAX_TEAMS);
        assert_eq!(sizing.byes, 0);

        assert!(matches!(
            bracket_size(MAX_TEAMS + 1),
            Err(BracketError::InvalidInput(_))
        ));
    }
}

//! Session-wide win and draw tallies.

use super::GameStatus;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Wins per player and draws, kept across games until explicitly reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won by X.
    x_wins: u32,
    /// Games won by O.
    o_wins: u32,
    /// Games ending in a draw.
    draws: u32,
}

impl Scoreboard {
    /// Counts a terminal status. `InProgress` is ignored.
    pub fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(crate::Player::X) => self.x_wins += 1,
            GameStatus::Won(crate::Player::O) => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }

    /// Zeroes all counts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {}  O: {}  Draws: {}", self.x_wins, self.o_wins, self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_record_and_reset() {
        let mut scores = Scoreboard::default();
        scores.record(GameStatus::Won(Player::X));
        scores.record(GameStatus::Won(Player::X));
        scores.record(GameStatus::Draw);
        scores.record(GameStatus::InProgress);
        assert_eq!((*scores.x_wins(), *scores.o_wins(), *scores.draws()), (2, 0, 1));
        assert_eq!(scores.to_string(), "X: 2  O: 0  Draws: 1");

        scores.reset();
        assert_eq!(scores, Scoreboard::default());
    }
}

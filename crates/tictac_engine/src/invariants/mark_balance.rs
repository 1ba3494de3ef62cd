//! Mark balance: the two players' mark counts never drift apart.

use super::super::{Game, Player};
use super::Invariant;

/// Invariant: the starting player has as many marks as the other, or one more.
pub struct MarkBalance;

impl Invariant<Game> for MarkBalance {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        let first = board.count(game.starting_player());
        let second = board.count(game.starting_player().opponent());
        first == second || first == second + 1
    }

    fn description() -> &'static str {
        "Starting player has the same number of marks as the opponent, or one more"
    }
}

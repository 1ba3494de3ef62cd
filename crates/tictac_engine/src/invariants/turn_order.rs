//! Turn order: the active player follows from the marks on the board.

use super::super::Game;
use super::Invariant;

/// Invariant: with an even number of marks the starting player is active,
/// with an odd number the other player is.
pub struct TurnOrder;

impl Invariant<Game> for TurnOrder {
    fn holds(game: &Game) -> bool {
        let expected = if game.board().occupied() % 2 == 0 {
            game.starting_player()
        } else {
            game.starting_player().opponent()
        };
        game.active_player() == expected
    }

    fn description() -> &'static str {
        "Active player alternates from the starting player"
    }
}

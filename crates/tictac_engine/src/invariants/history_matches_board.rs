//! History consistency: the snapshot under the cursor is the live board.

use super::super::Game;
use super::Invariant;

/// Invariant: the history snapshot at the cursor equals the board.
pub struct HistoryMatchesBoard;

impl Invariant<Game> for HistoryMatchesBoard {
    fn holds(game: &Game) -> bool {
        let history = game.history();
        history.current_board() == game.board()
            && history.current_step() == game.board().occupied()
    }

    fn description() -> &'static str {
        "History snapshot at the cursor matches the board"
    }
}

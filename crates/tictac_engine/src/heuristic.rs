//! Fixed-priority move heuristic.
//!
//! Both the computer opponent and the assistant's hints come from
//! [`choose_move`]. They differ only in how a corner or side is picked when
//! several are free, which is delegated to a [`TieBreak`].

use super::rules::check_winner;
use super::{Board, Player, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Which priority tier produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Tier {
    /// Completes a line for the mover.
    Win,
    /// Stops the opponent from completing a line.
    Block,
    /// Takes the center.
    Center,
    /// Takes a corner.
    Corner,
    /// Takes a side.
    Side,
}

/// Picks one cell from a non-empty candidate list.
pub trait TieBreak {
    /// Chooses among `candidates`, which are in ascending index order.
    fn pick(&mut self, candidates: &[Position]) -> Option<Position>;
}

/// Always takes the lowest-index candidate. Used for advice.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl TieBreak for FirstCandidate {
    fn pick(&mut self, candidates: &[Position]) -> Option<Position> {
        candidates.first().copied()
    }
}

/// Picks uniformly at random. Used by the computer opponent.
#[derive(Debug)]
pub struct RandomCandidate<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> RandomCandidate<'a, R> {
    /// Wraps a random number generator.
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TieBreak for RandomCandidate<'_, R> {
    fn pick(&mut self, candidates: &[Position]) -> Option<Position> {
        candidates.choose(&mut *self.rng).copied()
    }
}

/// Lowest-index empty cell that completes a line for `player`.
fn finishing_cell(board: &Board, player: Player) -> Option<Position> {
    Position::valid_moves(board)
        .into_iter()
        .find(|&pos| check_winner(&board.with_mark(pos, player)) == Some(player))
}

/// Chooses a move for `for_player` and reports which tier it came from.
///
/// Returns `None` only when the board is full.
#[instrument(skip(board, tie_break), fields(player = %for_player))]
pub fn choose_move_with_tier<T: TieBreak + ?Sized>(
    board: &Board,
    for_player: Player,
    tie_break: &mut T,
) -> Option<(Position, Tier)> {
    let choice = if let Some(pos) = finishing_cell(board, for_player) {
        Some((pos, Tier::Win))
    } else if let Some(pos) = finishing_cell(board, for_player.opponent()) {
        Some((pos, Tier::Block))
    } else if board.is_empty(Position::Center) {
        Some((Position::Center, Tier::Center))
    } else {
        let free = |cells: &[Position]| -> Vec<Position> {
            cells.iter().copied().filter(|p| board.is_empty(*p)).collect()
        };
        let corners = free(&Position::CORNERS);
        let sides = free(&Position::SIDES);
        tie_break
            .pick(&corners)
            .map(|pos| (pos, Tier::Corner))
            .or_else(|| tie_break.pick(&sides).map(|pos| (pos, Tier::Side)))
    };

    match choice {
        Some((pos, tier)) => debug!(position = pos.to_index(), %tier, "Heuristic chose move"),
        None => debug!("Board is full, no move available"),
    }
    choice
}

/// Chooses a move for `for_player` using the fixed priority order.
pub fn choose_move<T: TieBreak + ?Sized>(
    board: &Board,
    for_player: Player,
    tie_break: &mut T,
) -> Option<Position> {
    choose_move_with_tier(board, for_player, tie_break).map(|(pos, _)| pos)
}

/// Deterministic suggestion, as given by the assistant.
pub fn suggest_move(board: &Board, for_player: Player) -> Option<Position> {
    choose_move(board, for_player, &mut FirstCandidate)
}

/// Randomized choice, as played by the computer opponent.
pub fn computer_move<R: Rng>(board: &Board, for_player: Player, rng: &mut R) -> Option<Position> {
    choose_move(board, for_player, &mut RandomCandidate::new(rng))
}

//! Accepted moves and move rejections.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A ply accepted by the engine: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player who moved.
    pub player: Player,
    /// Where the mark was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why the engine refused an action. State is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game already ended.
    #[display("Game is already over")]
    GameOver,

    /// The cell index is not on the board.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// The square at the position is already occupied.
    #[display("{} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// The computer is to move; people wait their turn.
    #[display("Waiting for the computer to move")]
    AwaitingComputer,

    /// No history snapshot exists for the requested step.
    #[display("History has no step {}", _0)]
    UnknownStep(#[error(not(source))] usize),
}

//! Board snapshots with a rewind cursor.

use super::Board;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Ordered board snapshots, one per ply, starting with the empty board.
///
/// `current` points at the snapshot the game is showing. Recording a new
/// snapshot drops everything after `current` first, so moving after a rewind
/// replaces the old future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<Board>,
    current: usize,
}

impl History {
    /// History holding only the empty board.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Board::new()],
            current: 0,
        }
    }

    /// Appends a snapshot after the cursor, discarding any later ones.
    #[instrument(skip(self, board), fields(current = self.current, len = self.snapshots.len()))]
    pub fn record(&mut self, board: Board) {
        if self.current + 1 < self.snapshots.len() {
            debug!(
                discarded = self.snapshots.len() - self.current - 1,
                "Dropping snapshots past rewind point"
            );
        }
        self.snapshots.truncate(self.current + 1);
        self.snapshots.push(board);
        self.current = self.snapshots.len() - 1;
    }

    /// Moves the cursor to `step`, returning that snapshot.
    pub fn rewind(&mut self, step: usize) -> Option<&Board> {
        let board = self.snapshots.get(step)?;
        self.current = step;
        Some(board)
    }

    /// Snapshot at the cursor.
    pub fn current_board(&self) -> &Board {
        &self.snapshots[self.current]
    }

    /// Index of the snapshot at the cursor.
    pub fn current_step(&self) -> usize {
        self.current
    }

    /// Number of snapshots kept.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; the initial board is never dropped.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in order.
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_starts_with_empty_board() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_step(), 0);
        assert_eq!(history.current_board(), &Board::new());
    }

    #[test]
    fn test_record_after_rewind_truncates() {
        let mut history = History::new();
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::Center, Position::TopRight] {
            board = board.with_mark(pos, Player::X);
            history.record(board.clone());
        }
        assert_eq!(history.len(), 4);

        assert!(history.rewind(1).is_some());
        history.record(Board::new().with_mark(Position::BottomRight, Player::O));
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_step(), 2);
    }

    #[test]
    fn test_rewind_out_of_range_keeps_cursor() {
        let mut history = History::new();
        history.record(Board::new().with_mark(Position::Center, Player::X));
        assert!(history.rewind(5).is_none());
        assert_eq!(history.current_step(), 1);
    }
}

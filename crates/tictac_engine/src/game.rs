//! Game engine: turn state, history, scoring and mode.

use super::action::{Move, MoveError};
use super::heuristic::{TieBreak, choose_move};
use super::history::History;
use super::position::Position;
use super::rules::{check_winner, is_draw, winning_line};
use super::score::Scoreboard;
use super::types::{Board, GameStatus, Mode, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Tic-tac-toe game engine.
///
/// Owns the board, whose turn it is, the history of snapshots and the
/// session scoreboard. Every mutation goes through one of the methods below;
/// rejected actions return an error and leave everything untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    active: Player,
    mode: Mode,
    status: GameStatus,
    starting_player: Player,
    history: History,
    scores: Scoreboard,
}

impl Game {
    /// Creates a game in `mode` with X to move first.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            active: Player::X,
            mode,
            status: GameStatus::InProgress,
            starting_player: Player::X,
            history: History::new(),
            scores: Scoreboard::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Places the active player's mark at cell `index` (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the game ended,
    /// [`MoveError::OutOfRange`] for an index past 8, and
    /// [`MoveError::CellOccupied`] for a taken cell.
    #[instrument(skip(self), fields(player = %self.active))]
    pub fn apply_move(&mut self, index: usize) -> Result<Move, MoveError> {
        let position = self
            .validate(index)
            .inspect_err(|e| debug!(error = %e, "Move rejected"))?;

        let mv = Move::new(self.active, position);
        self.board.set(position, Square::Occupied(self.active));
        self.history.record(self.board.clone());
        self.active = self.active.opponent();
        self.update_status();

        debug!(%mv, status = %self.status, "Move applied");
        self.assert_invariants();
        Ok(mv)
    }

    fn validate(&self, index: usize) -> Result<Position, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let position = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        if !self.board.is_empty(position) {
            return Err(MoveError::CellOccupied(position));
        }
        Ok(position)
    }

    /// Re-evaluates the board after a move, scoring a finished game.
    fn update_status(&mut self) {
        if let Some(winner) = check_winner(&self.board) {
            self.status = GameStatus::Won(winner);
        } else if is_draw(&self.board) {
            self.status = GameStatus::Draw;
        } else {
            return;
        }
        self.scores.record(self.status);
        info!(status = %self.status, scores = %self.scores, "Game over");
    }

    /// Whether the computer is due to move now.
    pub fn computer_to_move(&self) -> bool {
        self.status == GameStatus::InProgress && self.mode.autonomous_player() == Some(self.active)
    }

    /// Plays the computer's move, if it is the computer's turn.
    ///
    /// Re-reads the current state, so a stale request after a new game or a
    /// finished game does nothing.
    #[instrument(skip(self, tie_break), fields(mode = %self.mode, status = %self.status))]
    pub fn play_computer_move<T: TieBreak + ?Sized>(&mut self, tie_break: &mut T) -> Option<Move> {
        if !self.computer_to_move() {
            debug!("Not the computer's turn, skipping");
            return None;
        }
        let position = choose_move(&self.board, self.active, tie_break)?;
        if !self.board.is_empty(position) {
            warn!(position = position.to_index(), "Heuristic picked an occupied cell");
            return None;
        }
        self.apply_move(position.to_index()).ok()
    }

    // ─────────────────────────────────────────────────────────────
    //  Game lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Starts the next game. The starting player alternates between games.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.start(self.starting_player.opponent());
    }

    /// Switches mode and starts a new game with X first.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        info!(from = %self.mode, to = %mode, "Changing mode");
        self.mode = mode;
        self.start(Player::X);
    }

    fn start(&mut self, starting_player: Player) {
        self.board = Board::new();
        self.history = History::new();
        self.starting_player = starting_player;
        self.active = starting_player;
        self.status = GameStatus::InProgress;
        info!(mode = %self.mode, starting = %starting_player, "New game");
    }

    /// Zeroes the scoreboard. The current game is unaffected.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores.reset();
    }

    /// Rewinds (or fast-forwards) to history step `step`.
    ///
    /// The board, turn and status are restored from that snapshot; scores are
    /// left alone. The next accepted move discards every later snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::UnknownStep`] if no snapshot exists for `step`.
    #[instrument(skip(self), fields(len = self.history.len()))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), MoveError> {
        let board = self
            .history
            .rewind(step)
            .cloned()
            .ok_or(MoveError::UnknownStep(step))
            .inspect_err(|e| debug!(error = %e, "Rewind rejected"))?;

        self.active = if step % 2 == 0 {
            self.starting_player
        } else {
            self.starting_player.opponent()
        };
        self.status = match check_winner(&board) {
            Some(winner) => GameStatus::Won(winner),
            None if is_draw(&board) => GameStatus::Draw,
            None => GameStatus::InProgress,
        };
        self.board = board;
        debug!(active = %self.active, status = %self.status, "Rewound");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Read access
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner, if the game was won.
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Who opened this game.
    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    /// Cells of the winning line, for highlighting.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        winning_line(&self.board)
    }

    /// Returns the scoreboard.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Returns the snapshot history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Panics in debug builds if an engine invariant is broken.
    fn assert_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            use super::invariants::{EngineInvariants, InvariantSet};
            if let Err(violations) = EngineInvariants::check_all(self) {
                let descriptions = violations
                    .iter()
                    .map(|v| v.description.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                panic!("Engine invariant violated: {}", descriptions);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn corrupt_board_for_test(&mut self, index: usize, player: Player) {
        if let Some(pos) = Position::from_index(index) {
            self.board.set(pos, Square::Occupied(player));
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

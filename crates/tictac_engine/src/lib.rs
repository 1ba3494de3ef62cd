//! Tic-tac-toe engine with a heuristic opponent and a scripted assistant.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Square`], [`Player`], [`Position`]
//! - **Rules**: win, draw and winning-line evaluation in [`rules`]
//! - **Heuristic**: win / block / center / corner / side move choice in [`heuristic`]
//! - **Engine**: [`Game`] owns turns, history, scores and mode
//! - **Assistant**: keyword-matched canned answers in [`Advisor`]
//! - **Session**: [`Session`] is the event surface a front end drives,
//!   with deferred computer moves and replies queued on a [`Scheduler`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tictac_engine::{Mode, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig {
//!     mode: Mode::HumanVsComputer,
//!     seed: Some(7),
//!     ..SessionConfig::default()
//! });
//! session.apply_move(0).unwrap();
//! session.advance_by(Duration::from_secs(1));
//! assert_eq!(session.game().board().occupied(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod advisor;
mod game;
mod history;
mod position;
mod schedule;
mod score;
mod session;
mod types;

// Public rule, heuristic and invariant modules
pub mod heuristic;
pub mod invariants;
pub mod rules;

// Crate-level exports - Board model
pub use position::Position;
pub use types::{Board, GameStatus, Mode, Player, Square};

// Crate-level exports - Engine
pub use action::{Move, MoveError};
pub use game::Game;
pub use history::History;
pub use score::Scoreboard;

// Crate-level exports - Heuristic entry points
pub use heuristic::{FirstCandidate, RandomCandidate, TieBreak, Tier, choose_move, suggest_move};

// Crate-level exports - Assistant
pub use advisor::{Advisor, Intent, Speaker, TranscriptEntry, respond};

// Crate-level exports - Scheduling and session
pub use schedule::{Deferred, Scheduler, TaskHandle, TimerQueue};
pub use session::{
    DEFAULT_ASSISTANT_DELAY, DEFAULT_COMPUTER_DELAY, Session, SessionConfig, SessionView,
};

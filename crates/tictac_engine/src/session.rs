//! The event surface a front end talks to.
//!
//! A [`Session`] wires the engine, the assistant and a [`Scheduler`] together.
//! Front ends forward user events and advance the session clock; computer
//! moves and assistant replies arrive through deferred actions once their
//! delay has elapsed.

use super::action::{Move, MoveError};
use super::advisor::{Advisor, TranscriptEntry};
use super::heuristic::RandomCandidate;
use super::schedule::{Deferred, Scheduler, TaskHandle, TimerQueue};
use super::{Game, GameStatus, Mode, Player, Scoreboard};
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default delay before the computer plays.
pub const DEFAULT_COMPUTER_DELAY: Duration = Duration::from_millis(500);

/// Default delay before the assistant answers.
pub const DEFAULT_ASSISTANT_DELAY: Duration = Duration::from_millis(600);

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Mode of the first game.
    pub mode: Mode,
    /// Pause before the computer's move.
    pub computer_delay: Duration,
    /// Pause before the assistant's reply.
    pub assistant_delay: Duration,
    /// Seed for the computer's tie-breaks; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            computer_delay: DEFAULT_COMPUTER_DELAY,
            assistant_delay: DEFAULT_ASSISTANT_DELAY,
            seed: None,
        }
    }
}

/// Serializable snapshot of everything a renderer shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionView {
    /// Cells in row-major order, `None` when empty.
    cells: Vec<Option<Player>>,
    /// Player to move.
    active_player: Player,
    /// Current mode.
    mode: Mode,
    /// Game status.
    status: GameStatus,
    /// Cells (0-8) of the winning line, if any.
    winning_line: Option<[usize; 3]>,
    /// Session scoreboard.
    scores: Scoreboard,
    /// Index of the history snapshot on display.
    current_step: usize,
    /// Number of history snapshots.
    history_len: usize,
    /// Chat transcript, oldest first.
    transcript: Vec<TranscriptEntry>,
    /// True while an assistant reply is pending.
    assistant_thinking: bool,
    /// True while a computer move is pending.
    computer_pending: bool,
}

/// A play session: one engine, one chat transcript, one clock.
#[derive(Debug)]
pub struct Session<S: Scheduler = TimerQueue> {
    game: Game,
    advisor: Advisor,
    scheduler: S,
    rng: SmallRng,
    config: SessionConfig,
    clock: Duration,
    pending_computer: Option<TaskHandle>,
    pending_replies: usize,
}

impl Session<TimerQueue> {
    /// Creates a session driven by a [`TimerQueue`].
    pub fn new(config: SessionConfig) -> Self {
        Self::with_scheduler(config, TimerQueue::new())
    }
}

impl Default for Session<TimerQueue> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<S: Scheduler> Session<S> {
    /// Creates a session on a caller-supplied scheduler.
    #[instrument(skip(scheduler))]
    pub fn with_scheduler(config: SessionConfig, scheduler: S) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        info!(mode = %config.mode, "Session started");
        let mut session = Self {
            game: Game::new(config.mode),
            advisor: Advisor::new(),
            scheduler,
            rng,
            config,
            clock: Duration::ZERO,
            pending_computer: None,
            pending_replies: 0,
        };
        session.schedule_computer_if_due();
        session
    }

    // ─────────────────────────────────────────────────────────────
    //  User events
    // ─────────────────────────────────────────────────────────────

    /// A person picked cell `index` (0-8).
    ///
    /// # Errors
    ///
    /// Everything [`Game::apply_move`] rejects, plus
    /// [`MoveError::AwaitingComputer`] while the computer is to move.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize) -> Result<Move, MoveError> {
        if self.game.computer_to_move() {
            debug!("Ignoring human move during the computer's turn");
            return Err(MoveError::AwaitingComputer);
        }
        let mv = self.game.apply_move(index)?;
        self.schedule_computer_if_due();
        Ok(mv)
    }

    /// Starts the next game.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.cancel_computer();
        self.game.new_game();
        self.schedule_computer_if_due();
    }

    /// Changes mode; the new game starts with X.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        self.cancel_computer();
        self.game.set_mode(mode);
        self.schedule_computer_if_due();
    }

    /// Zeroes the scoreboard.
    pub fn reset_scores(&mut self) {
        self.game.reset_scores();
    }

    /// Rewinds to history step `step`.
    ///
    /// # Errors
    ///
    /// [`MoveError::UnknownStep`] if the step does not exist.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), MoveError> {
        self.game.jump_to(step)?;
        self.cancel_computer();
        self.schedule_computer_if_due();
        Ok(())
    }

    /// Sends a chat message. Returns false if it was blank and ignored.
    #[instrument(skip(self))]
    pub fn send_assistant_message(&mut self, text: &str) -> bool {
        let Some(message) = self.advisor.record_user(text) else {
            return false;
        };
        let at = self.clock + self.config.assistant_delay;
        self.scheduler.schedule(at, Deferred::AssistantReply { message });
        self.pending_replies += 1;
        true
    }

    // ─────────────────────────────────────────────────────────────
    //  Time
    // ─────────────────────────────────────────────────────────────

    /// Moves the clock to `now` and runs every action that came due, in order.
    /// Time never goes backwards; an earlier `now` is ignored.
    ///
    /// Returns how many deferred actions ran.
    #[instrument(skip(self), fields(clock = ?self.clock))]
    pub fn advance_to(&mut self, now: Duration) -> usize {
        if now > self.clock {
            self.clock = now;
        }
        let mut ran = 0;
        while let Some((handle, action)) = self.scheduler.pop_due(self.clock) {
            self.run(handle, action);
            ran += 1;
        }
        if ran > 0 {
            debug!(ran, pending = self.scheduler.pending(), "Deferred actions ran");
        }
        ran
    }

    /// Advances the clock by `delta`.
    pub fn advance_by(&mut self, delta: Duration) -> usize {
        self.advance_to(self.clock + delta)
    }

    /// When the next deferred action is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Current session time.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    fn run(&mut self, handle: TaskHandle, action: Deferred) {
        match action {
            Deferred::ComputerMove => {
                if self.pending_computer == Some(handle) {
                    self.pending_computer = None;
                }
                let mut tie_break = RandomCandidate::new(&mut self.rng);
                match self.game.play_computer_move(&mut tie_break) {
                    Some(mv) => info!(%mv, "Computer moved"),
                    None => debug!("Deferred computer move no longer applies"),
                }
            }
            Deferred::AssistantReply { message } => {
                self.pending_replies = self.pending_replies.saturating_sub(1);
                let reply = self.advisor.reply(&message, &self.game);
                debug!(reply, "Assistant replied");
            }
        }
    }

    fn schedule_computer_if_due(&mut self) {
        if self.pending_computer.is_none() && self.game.computer_to_move() {
            let at = self.clock + self.config.computer_delay;
            self.pending_computer = Some(self.scheduler.schedule(at, Deferred::ComputerMove));
        }
    }

    fn cancel_computer(&mut self) {
        if let Some(handle) = self.pending_computer.take() {
            self.scheduler.cancel(handle);
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Read access
    // ─────────────────────────────────────────────────────────────

    /// The engine.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Chat lines, oldest first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        self.advisor.transcript()
    }

    /// True while an assistant reply is pending.
    pub fn assistant_thinking(&self) -> bool {
        self.pending_replies > 0
    }

    /// True while a computer move is pending.
    pub fn computer_pending(&self) -> bool {
        self.pending_computer.is_some()
    }

    /// Settings this session was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot for renderers.
    pub fn view(&self) -> SessionView {
        let game = &self.game;
        SessionView {
            cells: game.board().squares().iter().map(|s| s.player()).collect(),
            active_player: game.active_player(),
            mode: game.mode(),
            status: game.status(),
            winning_line: game.winning_line().map(|line| line.map(|p| p.to_index())),
            scores: *game.scores(),
            current_step: game.history().current_step(),
            history_len: game.history().len(),
            transcript: self.advisor.transcript().to_vec(),
            assistant_thinking: self.assistant_thinking(),
            computer_pending: self.computer_pending(),
        }
    }
}

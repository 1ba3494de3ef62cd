//! Scripted chat assistant.
//!
//! Messages are matched against a fixed list of keyword rules, first match
//! wins. The only rule that looks at the game is the hint rule, which asks the
//! deterministic heuristic for the active player's best cell.

use super::heuristic::suggest_move;
use super::rules::is_full;
use super::{Game, Mode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const GREETING: &str = "Hi! I'm your Tic Tac Toe assistant. Ask me how to play, \
about the rules, or for a hint on your next move.";

const HOW_TO_PLAY: &str = "Players take turns placing their mark (X or O) in an empty \
cell of the 3x3 grid. Pick a cell by its number, 1 to 9, left to right and top to bottom. \
Get three in a row to win.";

const WIN_CONDITION: &str = "You win by placing three of your marks in a line: any row, \
any column, or either diagonal.";

const DRAW: &str = "A draw happens when all nine cells are filled and nobody has three \
in a row. Draws are counted on the scoreboard too.";

const RULES: &str = "Rules: the board has 9 cells. X and O alternate turns, one mark per \
turn, only on empty cells. Three in a row (horizontal, vertical or diagonal) wins. A full \
board without a line is a draw. The first player alternates from game to game.";

const FALLBACK: &str = "I'm not sure about that. Try asking how to play, what the rules \
are, how to win, or for a hint on your next move.";

/// Who wrote a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Speaker {
    /// The person at the keyboard.
    User,
    /// The scripted assistant.
    Assistant,
}

/// One line of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct TranscriptEntry {
    /// Author of the line.
    pub speaker: Speaker,
    /// Message text.
    pub text: String,
}

/// What a chat message is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Intent {
    /// How the game is played.
    HowToPlay,
    /// How a game is won.
    WinCondition,
    /// What a draw is.
    Draw,
    /// Which cell to play next.
    Hint,
    /// What the modes are.
    Mode,
    /// The full rules.
    Rules,
    /// Nothing recognised.
    Fallback,
}

impl Intent {
    /// Classifies a message by case-insensitive keyword tests.
    pub fn classify(message: &str) -> Self {
        let text = message.to_lowercase();
        let has = |word: &str| text.contains(word);

        if has("how to play") {
            Intent::HowToPlay
        } else if has("win") || has("condition") {
            Intent::WinCondition
        } else if has("draw") {
            Intent::Draw
        } else if has("move") && (has("suggest") || has("hint") || has("best") || has("play")) {
            Intent::Hint
        } else if has("computer") || has("mode") {
            Intent::Mode
        } else if has("rule") || has("about") {
            Intent::Rules
        } else {
            Intent::Fallback
        }
    }
}

/// Builds the assistant's answer to `message` for the given game.
#[instrument(skip(game))]
pub fn respond(message: &str, game: &Game) -> String {
    let intent = Intent::classify(message);
    debug!(%intent, "Classified chat message");
    match intent {
        Intent::HowToPlay => HOW_TO_PLAY.to_string(),
        Intent::WinCondition => WIN_CONDITION.to_string(),
        Intent::Draw => DRAW.to_string(),
        Intent::Hint => hint(game),
        Intent::Mode => mode_description(game.mode()),
        Intent::Rules => RULES.to_string(),
        Intent::Fallback => FALLBACK.to_string(),
    }
}

fn hint(game: &Game) -> String {
    if game.is_over() {
        return "The game is over. Start a new game and I'll help you with your moves."
            .to_string();
    }
    if is_full(game.board()) {
        return "The board is full, there are no moves left.".to_string();
    }
    let player = game.active_player();
    match suggest_move(game.board(), player) {
        Some(pos) => format!(
            "I suggest {} plays cell {} ({}).",
            player,
            pos.cell_number(),
            pos.label().to_lowercase()
        ),
        None => "The board is full, there are no moves left.".to_string(),
    }
}

fn mode_description(mode: Mode) -> String {
    let current = match mode {
        Mode::HumanVsHuman => "two players taking turns on the same board",
        Mode::HumanVsComputer => "you as X against the computer as O",
    };
    format!(
        "There are two modes: human-vs-human, where two people share the board, and \
human-vs-computer, where the computer plays O. Right now you're playing {}.",
        current
    )
}

/// Keeps the chat transcript for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisor {
    transcript: Vec<TranscriptEntry>,
}

impl Advisor {
    /// Starts a transcript with the assistant's greeting.
    pub fn new() -> Self {
        Self {
            transcript: vec![TranscriptEntry::new(Speaker::Assistant, GREETING.to_string())],
        }
    }

    /// Records a user message. Blank input is ignored and returns `None`;
    /// otherwise returns the trimmed text.
    #[instrument(skip(self))]
    pub fn record_user(&mut self, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            debug!("Ignoring blank chat message");
            return None;
        }
        self.transcript
            .push(TranscriptEntry::new(Speaker::User, message.to_string()));
        Some(message.to_string())
    }

    /// Answers `message` against `game` and records the reply.
    pub fn reply(&mut self, message: &str, game: &Game) -> &str {
        let text = respond(message, game);
        self.transcript
            .push(TranscriptEntry::new(Speaker::Assistant, text));
        &self.transcript[self.transcript.len() - 1].text
    }

    /// Records a message and answers it straight away.
    #[cfg(test)]
    fn ask(&mut self, message: &str, game: &Game) -> Option<String> {
        let message = self.record_user(message)?;
        Some(self.reply(&message, game).to_string())
    }

    /// All lines so far, oldest first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        assert_eq!(Intent::classify("How to play?"), Intent::HowToPlay);
        // "how to play" wins over the hint keywords.
        assert_eq!(Intent::classify("how to play the best move"), Intent::HowToPlay);
        assert_eq!(Intent::classify("Who is the WINNER?"), Intent::WinCondition);
        assert_eq!(Intent::classify("what's the winning condition"), Intent::WinCondition);
        assert_eq!(Intent::classify("can it be a draw"), Intent::Draw);
        assert_eq!(Intent::classify("suggest a move"), Intent::Hint);
        assert_eq!(Intent::classify("best move?"), Intent::Hint);
        assert_eq!(Intent::classify("hint for my move"), Intent::Hint);
        // Hint keywords only count alongside "move".
        assert_eq!(Intent::classify("give me a hint"), Intent::Fallback);
        assert_eq!(Intent::classify("how do i play"), Intent::Fallback);
        assert_eq!(Intent::classify("play against the computer"), Intent::Mode);
        assert_eq!(Intent::classify("which mode is this"), Intent::Mode);
        assert_eq!(Intent::classify("rules please"), Intent::Rules);
        assert_eq!(Intent::classify("tell me about it"), Intent::Rules);
        assert_eq!(Intent::classify("hello"), Intent::Fallback);
    }

    #[test]
    fn test_hint_reports_one_based_cell() {
        let mut game = Game::new(Mode::HumanVsHuman);
        game.apply_move(0).expect("legal move");
        let answer = respond("hint for my move", &game);
        assert!(answer.contains("cell 5"), "{}", answer);
        assert!(answer.contains("O"), "{}", answer);
    }

    #[test]
    fn test_hint_after_game_over() {
        let mut game = Game::new(Mode::HumanVsHuman);
        for cell in [0, 4, 1, 7, 2] {
            game.apply_move(cell).expect("legal move");
        }
        assert!(respond("suggest a move", &game).contains("game is over"));
    }

    #[test]
    fn test_mode_answer_names_current_mode() {
        let game = Game::new(Mode::HumanVsComputer);
        assert!(respond("mode?", &game).contains("against the computer as O"));
    }

    #[test]
    fn test_blank_input_not_recorded() {
        let game = Game::default();
        let mut advisor = Advisor::new();
        assert_eq!(advisor.ask("   ", &game), None);
        assert_eq!(advisor.transcript().len(), 1);
    }

    #[test]
    fn test_ask_appends_exchange() {
        let game = Game::default();
        let mut advisor = Advisor::new();
        let answer = advisor.ask("  what are the rules  ", &game).expect("answered");
        assert_eq!(answer, RULES);
        let transcript = advisor.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(
            transcript[1],
            TranscriptEntry::new(Speaker::User, "what are the rules".to_string())
        );
        assert_eq!(transcript[2].speaker, Speaker::Assistant);
    }
}

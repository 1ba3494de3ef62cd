//! Line-oriented terminal front end.
//!
//! Reads commands from stdin and wakes up for the session's deferred actions,
//! whichever comes first, on a single task.

use crate::config::AppConfig;
use anyhow::Result;
use derive_more::{Display, Error};
use tictac_engine::{GameStatus, Mode, Session, Speaker};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Duration, Instant, sleep_until};
use tracing::{info, instrument};

const HELP: &str = "\
Commands:
  1-9            play that cell
  new            start a new game
  mode <mode>    human-vs-human | human-vs-computer
  reset          reset the scoreboard
  goto <step>    rewind to a history step
  ask <text>     chat with the assistant (or: ? <text>)
  show           redraw the board
  json           print the session as JSON
  help           this text
  quit           leave";

/// Wake-up used when nothing is scheduled; the branch is disabled anyway.
const IDLE: Duration = Duration::from_secs(3600);

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a cell, 0-based.
    Play(usize),
    /// Start a new game.
    New,
    /// Change mode.
    Mode(Mode),
    /// Reset the scoreboard.
    Reset,
    /// Rewind to a history step.
    Goto(usize),
    /// Send a chat message.
    Ask(String),
    /// Redraw.
    Show,
    /// Dump the session view as JSON.
    Json,
    /// Print help.
    Help,
    /// Exit.
    Quit,
}

/// Why an input line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// Nothing matched.
    #[display("Unknown command '{}', type 'help'", _0)]
    Unknown(#[error(not(source))] String),
    /// Cell numbers start at 1.
    #[display("Cells are numbered 1-9")]
    CellZero,
    /// `mode` needs a valid mode name.
    #[display("Unknown mode '{}', use human-vs-human or human-vs-computer", _0)]
    BadMode(#[error(not(source))] String),
    /// `goto` needs a step number.
    #[display("'goto' needs a step number")]
    BadStep,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Ok(cell) = line.parse::<usize>() {
        return cell
            .checked_sub(1)
            .map(|index| Some(Command::Play(index)))
            .ok_or(CommandError::CellZero);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_lowercase().as_str() {
        "new" => Command::New,
        "mode" => Command::Mode(
            rest.parse()
                .map_err(|_| CommandError::BadMode(rest.to_string()))?,
        ),
        "reset" => Command::Reset,
        "goto" => Command::Goto(rest.parse().map_err(|_| CommandError::BadStep)?),
        "ask" | "?" => Command::Ask(rest.to_string()),
        "show" => Command::Show,
        "json" => Command::Json,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

/// Renders a session to stdout, remembering which chat lines it already showed.
#[derive(Debug, Default)]
struct Renderer {
    transcript_shown: usize,
}

impl Renderer {
    fn board(&self, session: &Session) {
        let game = session.game();
        println!("\n{}\n", game.board().display());
        let status = match game.status() {
            GameStatus::InProgress if session.computer_pending() => {
                "Computer is thinking...".to_string()
            }
            GameStatus::InProgress => format!("Player {} to move", game.active_player()),
            GameStatus::Won(player) => {
                let line = game
                    .winning_line()
                    .map(|cells| {
                        cells
                            .iter()
                            .map(|p| p.cell_number().to_string())
                            .collect::<Vec<_>>()
                            .join("-")
                    })
                    .unwrap_or_default();
                format!("Player {} wins! ({})", player, line)
            }
            GameStatus::Draw => "It's a draw!".to_string(),
        };
        println!("{}  [{}]", status, game.mode());
        println!(
            "Score  {}  |  step {}/{}",
            game.scores(),
            game.history().current_step(),
            game.history().len() - 1
        );
    }

    fn chat(&mut self, session: &Session) {
        for entry in &session.transcript()[self.transcript_shown..] {
            let who = match entry.speaker {
                Speaker::User => "you",
                Speaker::Assistant => "assistant",
            };
            println!("[{}] {}", who, entry.text);
        }
        self.transcript_shown = session.transcript().len();
        if session.assistant_thinking() {
            println!("[assistant is typing...]");
        }
    }
}

/// Runs the REPL until `quit` or end of input.
#[instrument(skip(config))]
pub async fn run(config: &AppConfig) -> Result<()> {
    let mut session = Session::new(config.session_config());
    info!(config = ?session.config(), "Session started");
    let mut renderer = Renderer::default();
    let start = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    renderer.chat(&session);
    renderer.board(&session);

    loop {
        let deadline = session.next_deadline().map(|at| start + at);
        let wake = deadline.unwrap_or_else(|| Instant::now() + IDLE);

        tokio::select! {
            line = lines.next_line() => {
                session.advance_to(start.elapsed());
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => dispatch(&mut session, &mut renderer, command)?,
                    Ok(None) => {}
                    Err(e) => println!("{}", e),
                }
            }
            _ = sleep_until(wake), if deadline.is_some() => {
                session.advance_to(start.elapsed());
                renderer.chat(&session);
                renderer.board(&session);
            }
        }
    }
    Ok(())
}

fn dispatch(session: &mut Session, renderer: &mut Renderer, command: Command) -> Result<()> {
    match command {
        Command::Play(index) => {
            if let Err(e) = session.apply_move(index) {
                println!("{}", e);
                return Ok(());
            }
        }
        Command::New => session.new_game(),
        Command::Mode(mode) => session.set_mode(mode),
        Command::Reset => session.reset_scores(),
        Command::Goto(step) => {
            if let Err(e) = session.jump_to(step) {
                println!("{}", e);
                return Ok(());
            }
        }
        Command::Ask(text) => {
            if session.send_assistant_message(&text) {
                renderer.chat(session);
            }
            return Ok(());
        }
        Command::Json => {
            println!("{}", serde_json::to_string_pretty(&session.view())?);
            return Ok(());
        }
        Command::Help => {
            println!("{}", HELP);
            return Ok(());
        }
        Command::Show | Command::Quit => {}
    }
    renderer.board(session);
    Ok(())
}

//! Command-line interface for tictac.

use clap::Parser;
use std::path::PathBuf;
use tictac_engine::Mode;

/// Tic Tac Toe in the terminal, with a computer opponent and a chat helper
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Tic Tac Toe with a heuristic computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tictac.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Game mode: human-vs-human or human-vs-computer
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Seed for the computer's random choices
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_mode_and_seed() {
        let cli = Cli::try_parse_from(["tictac", "--mode", "human-vs-computer", "--seed", "4"])
            .expect("valid args");
        assert_eq!(cli.mode, Some(Mode::HumanVsComputer));
        assert_eq!(cli.seed, Some(4));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["tictac", "--mode", "solo"]).is_err());
    }
}

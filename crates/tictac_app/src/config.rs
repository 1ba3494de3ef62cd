//! Front-end configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictac_engine::{Mode, SessionConfig};
use tracing::{debug, info, instrument};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "tictac.toml";

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Mode of the first game.
    #[serde(default)]
    mode: Mode,

    /// Milliseconds before the computer moves.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Milliseconds before the assistant answers.
    #[serde(default = "default_assistant_delay_ms")]
    assistant_delay_ms: u64,

    /// Seed for the computer's random choices.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_computer_delay_ms() -> u64 {
    tictac_engine::DEFAULT_COMPUTER_DELAY.as_millis() as u64
}

fn default_assistant_delay_ms() -> u64 {
    tictac_engine::DEFAULT_ASSISTANT_DELAY.as_millis() as u64
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            computer_delay_ms: default_computer_delay_ms(),
            assistant_delay_ms: default_assistant_delay_ms(),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] when present,
    /// else the built-in defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, mode: Option<Mode>, seed: Option<u64>) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Engine session settings.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            mode: self.mode,
            computer_delay: Duration::from_millis(self.computer_delay_ms),
            assistant_delay: Duration::from_millis(self.assistant_delay_ms),
            seed: self.seed,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_full_config_parses() {
        let file = write_config(
            r#"
mode = "human-vs-computer"
computer_delay_ms = 250
assistant_delay_ms = 100
seed = 42
"#,
        );
        let config = AppConfig::from_file(file.path()).expect("valid config");
        assert_eq!(*config.mode(), Mode::HumanVsComputer);
        assert_eq!(*config.seed(), Some(42));

        let session = config.session_config();
        assert_eq!(session.computer_delay, Duration::from_millis(250));
        assert_eq!(session.assistant_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_missing_fields_default() {
        let file = write_config("seed = 3\n");
        let config = AppConfig::from_file(file.path()).expect("valid config");
        assert_eq!(*config.mode(), Mode::HumanVsHuman);
        assert_eq!(*config.computer_delay_ms(), 500);
        assert_eq!(*config.assistant_delay_ms(), 600);
    }

    #[test]
    fn test_bad_mode_is_an_error() {
        let file = write_config("mode = \"robot-vs-robot\"\n");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"), "{}", err);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let file = write_config("difficulty = \"hard\"\n");
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::default().with_overrides(Some(Mode::HumanVsComputer), Some(9));
        assert_eq!(*config.mode(), Mode::HumanVsComputer);
        assert_eq!(*config.seed(), Some(9));

        let unchanged = config.clone().with_overrides(None, None);
        assert_eq!(unchanged, config);
    }
}

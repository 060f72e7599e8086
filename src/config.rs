//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use sliding_tictactoe::{DEFAULT_MAX_DEPTH, Mark, SearchConfig};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "sliding_games.toml";

/// Settings for local and networked play.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Search horizon for the computer opponent, clamped when used.
    #[serde(default = "default_search_depth")]
    search_depth: u8,

    /// Mark the human plays in local games.
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Name shown to the other side of a match.
    #[serde(default = "default_player_name")]
    player_name: String,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_search_depth() -> u8 {
    DEFAULT_MAX_DEPTH
}

#[instrument]
fn default_human_mark() -> Mark {
    Mark::X
}

#[instrument]
fn default_player_name() -> String {
    "Player".to_string()
}

#[instrument]
fn default_log_filter() -> String {
    "info,sliding_games=debug".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            search_depth: default_search_depth(),
            human_mark: default_human_mark(),
            player_name: default_player_name(),
            log_filter: default_log_filter(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            search_depth = config.search_depth,
            human_mark = %config.human_mark,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is not a valid config.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns a copy with the given search depth.
    pub fn with_search_depth(mut self, search_depth: u8) -> Self {
        self.search_depth = search_depth;
        self
    }

    /// Returns a copy with the given human mark.
    pub fn with_human_mark(mut self, human_mark: Mark) -> Self {
        self.human_mark = human_mark;
        self
    }

    /// Returns a copy with the given player name.
    pub fn with_player_name(mut self, player_name: impl Into<String>) -> Self {
        self.player_name = player_name.into();
        self
    }

    /// Mark played by the computer in local games.
    pub fn computer_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    /// Search settings derived from `search_depth`.
    pub fn search(&self) -> SearchConfig {
        SearchConfig::new(self.search_depth)
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
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

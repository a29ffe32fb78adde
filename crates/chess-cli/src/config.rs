//! Session configuration loaded from a TOML file.

use chess_core::Color;
use chess_policy::PolicyKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Who controls one side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerKind {
    Human,
    Random,
    Greedy,
    TwoPly,
}

impl PlayerKind {
    /// Returns the policy driving this side, or `None` for a human.
    pub fn policy(self) -> Option<PolicyKind> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::Random => Some(PolicyKind::Random),
            PlayerKind::Greedy => Some(PolicyKind::Greedy),
            PlayerKind::TwoPly => Some(PolicyKind::TwoPly),
        }
    }
}

/// The `[players]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayersConfig {
    #[serde(default = "default_white")]
    pub white: PlayerKind,
    #[serde(default = "default_black")]
    pub black: PlayerKind,
    /// Seed for the computer players. Entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Plies after which computer players stop moving on their own.
    #[serde(default = "default_move_limit")]
    pub move_limit: usize,
}

fn default_white() -> PlayerKind {
    PlayerKind::Human
}

fn default_black() -> PlayerKind {
    PlayerKind::Greedy
}

fn default_move_limit() -> usize {
    500
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            white: default_white(),
            black: default_black(),
            seed: None,
            move_limit: default_move_limit(),
        }
    }
}

impl PlayersConfig {
    pub fn get(&self, color: Color) -> PlayerKind {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// The `[display]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// List the legal moves after every board.
    #[serde(default)]
    pub show_legal_moves: bool,
    /// Print the FEN after every board.
    #[serde(default)]
    pub show_fen: bool,
}

/// Main session configuration.
///
/// Uses `chess.toml` in the current directory by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub players: PlayersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration
    /// (human White against a greedy Black).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chess-cli-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[players]
white = "two-ply"
black = "random"
seed = 17
move_limit = 80

[display]
show_legal_moves = true
show_fen = true
"#;

        let config: Config = toml::from_str(toml_content).unwrap();

        assert_eq!(config.players.white, PlayerKind::TwoPly);
        assert_eq!(config.players.black, PlayerKind::Random);
        assert_eq!(config.players.seed, Some(17));
        assert_eq!(config.players.move_limit, 80);
        assert!(config.display.show_legal_moves);
        assert!(config.display.show_fen);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("[players]\nblack = \"human\"\n").unwrap();

        assert_eq!(config.players.white, PlayerKind::Human);
        assert_eq!(config.players.black, PlayerKind::Human);
        assert_eq!(config.players.seed, None);
        assert_eq!(config.players.move_limit, 500);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.players.get(Color::White), PlayerKind::Human);
        assert_eq!(config.players.get(Color::Black), PlayerKind::Greedy);
    }

    #[test]
    fn test_unknown_player_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[players]\nwhite = \"stockfish\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_player_policies() {
        assert_eq!(PlayerKind::Human.policy(), None);
        assert_eq!(PlayerKind::Greedy.policy(), Some(PolicyKind::Greedy));
        assert_eq!(PlayerKind::TwoPly.policy(), Some(PolicyKind::TwoPly));
    }

    #[test]
    fn test_load_returns_default_when_file_does_not_exist() {
        let path = temp_path("missing");
        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reads_file() {
        let path = temp_path("valid");
        std::fs::write(&path, "[display]\nshow_fen = true\n").unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(config.display.show_fen);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = temp_path("invalid");
        std::fs::write(&path, "[players\nwhite = ").unwrap();
        let result = Config::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}

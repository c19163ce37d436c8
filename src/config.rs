use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::agent::AgentSpec;
use crate::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::ConfigError;

/// Headless match configuration, loadable from TOML.
///
/// ```toml
/// board_size = 9
/// games = 3
/// seed = 7
///
/// [black]
/// kind = "alphabeta"
/// depth = 2
///
/// [white]
/// kind = "mcts"
/// n_simulations = 200
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub board_size: usize,
    pub games: u32,
    /// Base seed; each agent derives its own from it unless it sets one
    pub seed: Option<u64>,
    pub black: AgentSpec,
    pub white: AgentSpec,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            board_size: DEFAULT_BOARD_SIZE,
            games: 1,
            seed: None,
            // Full-width search at the factory depth of 4 is too slow for 15x15
            black: AgentSpec {
                depth: Some(2),
                ..AgentSpec::of("alphabeta")
            },
            white: AgentSpec::of("mcts"),
        }
    }
}

impl MatchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: MatchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::Validation(format!(
                "board_size must be in [{MIN_BOARD_SIZE}, {MAX_BOARD_SIZE}]"
            )));
        }
        if self.games == 0 {
            return Err(ConfigError::Validation("games must be >= 1".into()));
        }
        self.black.validate()?;
        self.white.validate()?;
        Ok(())
    }

    /// Seed for one side's agent in one game, so replays are exact and the
    /// two sides never share a stream.
    pub fn agent_seed(&self, game: u32, side: usize) -> Option<u64> {
        self.seed
            .map(|seed| seed.wrapping_add(u64::from(game) * 2 + side as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.board_size, 15);
    }

    #[test]
    fn test_default_match_agents_move() {
        use crate::agent::{build_agent, Agent, GameState};
        use crate::board::{Board, Stone};

        let config = MatchConfig {
            seed: Some(3),
            ..MatchConfig::default()
        };
        let mut board = Board::new(config.board_size);
        for (side, color) in [(0, Stone::Black), (1, Stone::White)] {
            let spec = if side == 0 { &config.black } else { &config.white };
            let mut agent = build_agent(spec, config.board_size, config.agent_seed(0, side)).unwrap();
            let mv = agent.make_move(&GameState::new(&board, color)).unwrap();
            assert!(board.place_stone(mv, color));
        }
        assert_eq!(board.stone_count(), 2);
    }

    #[test]
    fn test_parse_toml() {
        let config: MatchConfig = toml::from_str(
            r#"
            board_size = 9
            games = 4
            seed = 11

            [black]
            kind = "Minimax"
            depth = 2

            [white]
            kind = "qlearning"
            learning = true
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.board_size, 9);
        assert_eq!(config.black.depth, Some(2));
        assert_eq!(config.white.learning, Some(true));
        assert_eq!(config.agent_seed(1, 1), Some(14));
    }

    #[test]
    fn test_validation_errors() {
        let config = MatchConfig {
            board_size: 4,
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = MatchConfig {
            games: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = MatchConfig {
            white: AgentSpec::of("oracle"),
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::UnknownAgent(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = MatchConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.toml");
        std::fs::write(&path, "board_size = \"huge\"").unwrap();
        assert!(matches!(MatchConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }
}

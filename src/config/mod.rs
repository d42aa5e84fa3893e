use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::{GameError, GameResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Banked score a player must reach to win.
    pub goal: u32,
    pub die_sides: u32,
    pub players: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub text_width: usize,
    pub animation_speed: AnimationSpeed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnimationSpeed {
    None,
    Slow,
    Medium,
    Fast,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                goal: 100,
                die_sides: 6,
                players: 2,
            },
            ui: UiConfig {
                theme: "default".to_string(),
                text_width: 80,
                animation_speed: AnimationSpeed::Medium,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create default config file
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GameError::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| GameError::configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GameError::configuration(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .map_err(|e| GameError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::configuration("Invalid logging level")),
        }

        if self.game.goal == 0 {
            return Err(GameError::configuration("Goal must be greater than 0"));
        }
        // A playable die must be able to both bust and accumulate.
        if self.game.die_sides < 2 {
            return Err(GameError::configuration("Die must have at least 2 sides"));
        }
        if self.game.players < 2 {
            return Err(GameError::configuration("At least 2 players are required"));
        }
        if self.ui.text_width < 40 {
            return Err(GameError::configuration("Text width must be at least 40"));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(goal) = cli_config.goal {
            self.game.goal = goal;
        }
        if let Some(log_level) = cli_config.log_level {
            self.logging.level = log_level;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
    }

    pub fn get_animation_delay_ms(&self) -> u64 {
        match self.ui.animation_speed {
            AnimationSpeed::None => 0,
            AnimationSpeed::Slow => 150,
            AnimationSpeed::Medium => 75,
            AnimationSpeed::Fast => 25,
        }
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub goal: Option<u32>,
    pub log_level: Option<String>,
    pub debug: bool,
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.game.goal, 100);
        assert_eq!(config.game.die_sides, 6);
        assert_eq!(config.game.players, 2);
        assert_eq!(config.ui.theme, "default");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        // Test invalid logging level
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());

        // Reset and test degenerate game parameters
        config = Config::default();
        config.game.goal = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.game.die_sides = 1;
        assert!(config.validate().is_err());

        config = Config::default();
        config.game.players = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let original_config = Config::default();
        original_config.save_to_file(&config_path).unwrap();

        let loaded_config = Config::from_file(&config_path).unwrap();

        assert_eq!(original_config.game.goal, loaded_config.game.goal);
        assert_eq!(original_config.game.die_sides, loaded_config.game.die_sides);
        assert_eq!(original_config.ui.theme, loaded_config.ui.theme);
        assert_eq!(original_config.logging.level, loaded_config.logging.level);
    }

    #[test]
    fn test_missing_file_creates_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("missing.toml");

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.game.goal, 100);
        assert!(config_path.exists());
    }

    #[test]
    fn test_cli_config_merge() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            goal: Some(50),
            debug: true,
            ..Default::default()
        };

        config.merge_with_cli(cli_config);

        assert_eq!(config.game.goal, 50);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_animation_delay() {
        let mut config = Config::default();

        config.ui.animation_speed = AnimationSpeed::None;
        assert_eq!(config.get_animation_delay_ms(), 0);

        config.ui.animation_speed = AnimationSpeed::Slow;
        assert_eq!(config.get_animation_delay_ms(), 150);

        config.ui.animation_speed = AnimationSpeed::Fast;
        assert_eq!(config.get_animation_delay_ms(), 25);
    }
}

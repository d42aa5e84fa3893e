use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Input error: {message}")]
    Input { message: String },

    #[error("Player error: {message}")]
    Player { message: String },

    #[error("Turn error: {message}")]
    Turn { message: String },

    #[error("Game error: {message}")]
    Game { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GameError {
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn player<S: Into<String>>(message: S) -> Self {
        Self::Player {
            message: message.into(),
        }
    }

    pub fn turn<S: Into<String>>(message: S) -> Self {
        Self::Turn {
            message: message.into(),
        }
    }

    pub fn game<S: Into<String>>(message: S) -> Self {
        Self::Game {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = GameError::turn("Test turn error");
        assert!(matches!(error, GameError::Turn { .. }));
        assert_eq!(error.to_string(), "Turn error: Test turn error");
    }

    #[test]
    fn test_player_error() {
        let error = GameError::player("name cannot be empty");
        assert!(matches!(error, GameError::Player { .. }));
        assert_eq!(error.to_string(), "Player error: name cannot be empty");
    }
}

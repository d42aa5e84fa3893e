use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::{GameError, GameResult};

/// A participant's display name and permanent banked score.
///
/// The banked score only ever grows, and only through [`Player::bank`], which
/// the engine calls exactly once per completed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    banked_score: u32,
}

impl Player {
    pub fn new<S: Into<String>>(name: S) -> GameResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::player("player name cannot be empty"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            banked_score: 0,
        })
    }

    pub fn banked_score(&self) -> u32 {
        self.banked_score
    }

    /// Add a completed turn's amount and return the new banked total.
    pub fn bank(&mut self, amount: u32) -> u32 {
        self.banked_score += amount;
        self.banked_score
    }

    pub fn has_reached(&self, goal: u32) -> bool {
        self.banked_score >= goal
    }
}

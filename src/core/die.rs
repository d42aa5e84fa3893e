use crate::core::GameRng;
use crate::utils::{GameError, GameResult};

pub const DEFAULT_SIDES: u32 = 6;

/// Anything the engine can roll. Lets tests drive games with scripted rolls.
pub trait Roller {
    fn roll(&mut self) -> u32;
    fn sides(&self) -> u32;
}

#[derive(Debug, Clone)]
pub struct Die {
    sides: u32,
    rng: GameRng,
}

impl Die {
    pub fn new(sides: u32, rng: GameRng) -> GameResult<Self> {
        if sides == 0 {
            return Err(GameError::game("a die needs at least one side"));
        }
        Ok(Self { sides, rng })
    }

    pub fn six_sided(rng: GameRng) -> Self {
        Self {
            sides: DEFAULT_SIDES,
            rng,
        }
    }
}

impl Roller for Die {
    fn roll(&mut self) -> u32 {
        self.rng.gen_range(1..=self.sides)
    }

    fn sides(&self) -> u32 {
        self.sides
    }
}

pub mod die;
pub mod events;
pub mod game;
pub mod player;
pub mod rng;
pub mod turn;

pub use die::{Die, Roller};
pub use events::{EventLogger, GameEvent, GameEventHandler, GameEventType};
pub use game::GameEngine;
pub use player::Player;
pub use rng::GameRng;
pub use turn::{RollOutcome, Turn, TurnEndedBy, TurnOutcome, TurnPhase};

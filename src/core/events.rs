use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{Player, TurnOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEventType {
    GameStarted,
    TurnStarted,
    DiceRolled,
    TurnEnded,
    ScoreBanked,
    GameWon,
    Custom(String),
}

impl GameEvent {
    pub fn new(event_type: GameEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    // Convenience constructors for common events
    pub fn game_started(player_names: &[String], goal: u32) -> Self {
        let data = serde_json::json!({
            "players": player_names,
            "goal": goal
        });
        Self::new(GameEventType::GameStarted, data)
    }

    pub fn turn_started(player: &Player) -> Self {
        let data = serde_json::json!({
            "player_id": player.id,
            "player_name": player.name,
            "banked_score": player.banked_score()
        });
        Self::new(GameEventType::TurnStarted, data)
    }

    pub fn dice_rolled(player: &Player, value: u32, round_total: u32) -> Self {
        let data = serde_json::json!({
            "player_name": player.name,
            "value": value,
            "round_total": round_total
        });
        Self::new(GameEventType::DiceRolled, data)
    }

    pub fn turn_ended(player: &Player, outcome: &TurnOutcome) -> Self {
        let data = serde_json::json!({
            "player_name": player.name,
            "amount_to_bank": outcome.amount_to_bank,
            "ended_by": outcome.ended_by
        });
        Self::new(GameEventType::TurnEnded, data)
    }

    pub fn score_banked(player: &Player, amount: u32, new_total: u32) -> Self {
        let data = serde_json::json!({
            "player_name": player.name,
            "amount": amount,
            "new_total": new_total
        });
        Self::new(GameEventType::ScoreBanked, data)
    }

    pub fn game_won(player: &Player, score: u32, goal: u32) -> Self {
        let data = serde_json::json!({
            "player_name": player.name,
            "score": score,
            "goal": goal
        });
        Self::new(GameEventType::GameWon, data)
    }

    pub fn custom<S: Into<String>>(event_name: S, data: serde_json::Value) -> Self {
        Self::new(GameEventType::Custom(event_name.into()), data)
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

pub struct EventLogger {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn get_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn get_events_by_type(&self, event_type: &GameEventType) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|event| {
                std::mem::discriminant(&event.event_type) == std::mem::discriminant(event_type)
            })
            .collect()
    }

    pub fn get_recent_events(&self, count: usize) -> Vec<&GameEvent> {
        self.events.iter().rev().take(count).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn export_events(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }

    pub fn get_event_count(&self) -> usize {
        self.events.len()
    }

    pub fn get_event_count_by_type(&self, event_type: &GameEventType) -> usize {
        self.events
            .iter()
            .filter(|event| {
                std::mem::discriminant(&event.event_type) == std::mem::discriminant(event_type)
            })
            .count()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000) // Default max 1000 events
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());

        // Remove oldest events if we exceed max capacity
        if self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }
}

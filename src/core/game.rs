use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::{
    Die, EventLogger, GameEvent, GameEventHandler, GameRng, Player, RollOutcome, Roller, Turn,
    TurnEndedBy, TurnOutcome, TurnPhase,
};
use crate::utils::{GameError, GameResult};

/// Owns the players, alternates turns between them, and declares the winner.
///
/// The engine is deliberately input-free: the interface reads the die values
/// and continue/hold choices out of it and feeds decisions back in.
pub struct GameEngine {
    players: Vec<Player>,
    active: usize,
    goal: u32,
    die: Box<dyn Roller + Send>,
    turn: Turn,
    winner: Option<usize>,
    event_handler: Arc<Mutex<EventLogger>>,
}

impl GameEngine {
    pub fn new(config: &GameConfig, player_names: Vec<String>, rng: GameRng) -> GameResult<Self> {
        let die = Die::new(config.die_sides, rng)?;
        Self::with_roller(config.goal, player_names, Box::new(die))
    }

    /// Build an engine around any [`Roller`], e.g. a scripted one in tests.
    pub fn with_roller(
        goal: u32,
        player_names: Vec<String>,
        die: Box<dyn Roller + Send>,
    ) -> GameResult<Self> {
        if goal == 0 {
            return Err(GameError::game("the goal must be greater than zero"));
        }
        if player_names.len() < 2 {
            return Err(GameError::game("at least two players are required"));
        }

        let players = player_names
            .into_iter()
            .map(Player::new)
            .collect::<GameResult<Vec<_>>>()?;

        Ok(Self {
            players,
            active: 0,
            goal,
            die,
            turn: Turn::new(),
            winner: None,
            event_handler: Arc::new(Mutex::new(EventLogger::default())),
        })
    }

    pub async fn start(&mut self) -> GameResult<()> {
        let names: Vec<String> = self.players.iter().map(|p| p.name.clone()).collect();
        info!("Starting game: {} to {}", names.join(" vs "), self.goal);

        self.emit_event(GameEvent::game_started(&names, self.goal)).await;
        self.emit_event(GameEvent::turn_started(self.active_player())).await;
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn round_total(&self) -> u32 {
        self.turn.round_total()
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|index| &self.players[index])
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Roll the die for the active player. A 1 ends the turn on the spot.
    pub async fn roll(&mut self) -> GameResult<RollOutcome> {
        if self.is_over() {
            return Err(GameError::game("the game is already over"));
        }

        let value = self.die.roll();
        let roll = self.turn.apply_roll(value)?;
        debug!(
            player = %self.active_player().name,
            value,
            round_total = roll.round_total,
            "dice rolled"
        );
        self.emit_event(GameEvent::dice_rolled(self.active_player(), value, roll.round_total))
            .await;

        if roll.busted {
            self.finish_turn().await?;
        }

        Ok(roll)
    }

    /// Resolve the continue/hold decision after a successful roll.
    ///
    /// Returns `None` when the player keeps rolling, or the completed turn's
    /// outcome once they hold.
    pub async fn decide(&mut self, keep_rolling: bool) -> GameResult<Option<TurnOutcome>> {
        if self.is_over() {
            return Err(GameError::game("the game is already over"));
        }

        match self.turn.decide(keep_rolling)? {
            None => Ok(None),
            Some(_) => {
                let outcome = self.finish_turn().await?;
                Ok(Some(outcome))
            }
        }
    }

    /// Apply the finished turn to the active player, check the goal, and
    /// either crown the winner or pass the die.
    async fn finish_turn(&mut self) -> GameResult<TurnOutcome> {
        let outcome = self
            .turn
            .outcome()
            .ok_or_else(|| GameError::turn("the turn is still in progress"))?;

        let new_total = self.players[self.active].bank(outcome.amount_to_bank);
        info!(
            player = %self.players[self.active].name,
            amount = outcome.amount_to_bank,
            banked = new_total,
            "turn finished"
        );

        self.emit_event(GameEvent::turn_ended(self.active_player(), &outcome)).await;
        if outcome.ended_by == TurnEndedBy::VoluntaryHold {
            self.emit_event(GameEvent::score_banked(
                self.active_player(),
                outcome.amount_to_bank,
                new_total,
            ))
            .await;
        }

        // Reaching or exceeding the goal ends the game instantly; the other
        // player never gets a rebuttal turn.
        if self.players[self.active].has_reached(self.goal) {
            self.winner = Some(self.active);
            info!(player = %self.active_player().name, score = new_total, "game won");
            self.emit_event(GameEvent::game_won(self.active_player(), new_total, self.goal))
                .await;
        } else {
            self.active = (self.active + 1) % self.players.len();
            self.turn = Turn::new();
            self.emit_event(GameEvent::turn_started(self.active_player())).await;
        }

        Ok(outcome)
    }

    async fn emit_event(&self, event: GameEvent) {
        if let Ok(mut handler) = self.event_handler.try_lock() {
            handler.handle_event(&event);
        }
    }

    pub async fn get_event_history(&self) -> Vec<GameEvent> {
        if let Ok(handler) = self.event_handler.try_lock() {
            handler.get_events().to_vec()
        } else {
            Vec::new()
        }
    }

    pub async fn get_recent_events(&self, count: usize) -> Vec<GameEvent> {
        if let Ok(handler) = self.event_handler.try_lock() {
            handler.get_recent_events(count).into_iter().cloned().collect()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEventType;
    use pretty_assertions::assert_eq;

    struct ScriptedRoller {
        rolls: std::vec::IntoIter<u32>,
    }

    impl ScriptedRoller {
        fn new(rolls: Vec<u32>) -> Self {
            Self {
                rolls: rolls.into_iter(),
            }
        }
    }

    impl Roller for ScriptedRoller {
        fn roll(&mut self) -> u32 {
            self.rolls.next().expect("roll script exhausted")
        }

        fn sides(&self) -> u32 {
            6
        }
    }

    fn engine(goal: u32, rolls: Vec<u32>) -> GameEngine {
        GameEngine::with_roller(
            goal,
            vec!["Ann".to_string(), "Bob".to_string()],
            Box::new(ScriptedRoller::new(rolls)),
        )
        .unwrap()
    }

    #[test]
    fn test_engine_validation() {
        let no_players = GameEngine::with_roller(
            100,
            vec!["Ann".to_string()],
            Box::new(ScriptedRoller::new(vec![])),
        );
        assert!(no_players.is_err());

        let zero_goal = GameEngine::with_roller(
            0,
            vec!["Ann".to_string(), "Bob".to_string()],
            Box::new(ScriptedRoller::new(vec![])),
        );
        assert!(zero_goal.is_err());

        let blank_name = GameEngine::with_roller(
            100,
            vec!["Ann".to_string(), "  ".to_string()],
            Box::new(ScriptedRoller::new(vec![])),
        );
        assert!(blank_name.is_err());
    }

    #[tokio::test]
    async fn test_bust_banks_nothing_and_passes_the_die() {
        // Ann rolls 5, 3, then a 1.
        let mut game = engine(100, vec![5, 3, 1]);
        game.start().await.unwrap();

        let roll = game.roll().await.unwrap();
        assert_eq!(roll.value, 5);
        game.decide(true).await.unwrap();

        let roll = game.roll().await.unwrap();
        assert_eq!(roll.round_total, 8);
        game.decide(true).await.unwrap();

        let roll = game.roll().await.unwrap();
        assert!(roll.busted);
        assert_eq!(roll.round_total, 0);

        assert_eq!(game.players()[0].banked_score(), 0);
        assert_eq!(game.active_player().name, "Bob");
        assert!(!game.is_over());
    }

    #[tokio::test]
    async fn test_hold_banks_the_round_total() {
        // Ann rolls 5 and 3, then holds.
        let mut game = engine(100, vec![5, 3]);
        game.start().await.unwrap();

        game.roll().await.unwrap();
        game.decide(true).await.unwrap();
        game.roll().await.unwrap();
        let outcome = game.decide(false).await.unwrap().unwrap();

        assert_eq!(outcome.amount_to_bank, 8);
        assert_eq!(outcome.ended_by, TurnEndedBy::VoluntaryHold);
        assert_eq!(game.players()[0].banked_score(), 8);
        assert_eq!(game.active_player().name, "Bob");
    }

    #[tokio::test]
    async fn test_exact_goal_wins_immediately() {
        let mut game = engine(8, vec![5, 3]);
        game.start().await.unwrap();

        game.roll().await.unwrap();
        game.decide(true).await.unwrap();
        game.roll().await.unwrap();
        game.decide(false).await.unwrap();

        let winner = game.winner().expect("goal reached exactly");
        assert_eq!(winner.name, "Ann");
        assert_eq!(winner.banked_score(), 8);
        // Bob never got a turn.
        assert_eq!(game.players()[1].banked_score(), 0);
    }

    #[tokio::test]
    async fn test_winner_declared_without_rebuttal_turn() {
        // Ann banks 8, Bob busts, Ann banks 12 more and crosses 10 first.
        let mut game = engine(10, vec![4, 4, 1, 6, 6]);
        game.start().await.unwrap();

        game.roll().await.unwrap();
        game.decide(true).await.unwrap();
        game.roll().await.unwrap();
        game.decide(false).await.unwrap();
        assert_eq!(game.players()[0].banked_score(), 8);

        let roll = game.roll().await.unwrap();
        assert!(roll.busted);

        game.roll().await.unwrap();
        game.decide(true).await.unwrap();
        game.roll().await.unwrap();
        game.decide(false).await.unwrap();

        assert!(game.is_over());
        assert_eq!(game.winner().unwrap().name, "Ann");
        assert_eq!(game.players()[0].banked_score(), 20);
        assert_eq!(game.players()[1].banked_score(), 0);
    }

    #[tokio::test]
    async fn test_finished_game_rejects_further_play() {
        let mut game = engine(8, vec![5, 3]);
        game.start().await.unwrap();

        game.roll().await.unwrap();
        game.decide(true).await.unwrap();
        game.roll().await.unwrap();
        game.decide(false).await.unwrap();
        assert!(game.is_over());

        assert!(game.roll().await.is_err());
        assert!(game.decide(false).await.is_err());
        assert_eq!(game.winner().unwrap().banked_score(), 8);
    }

    #[tokio::test]
    async fn test_decision_before_roll_changes_nothing() {
        let mut game = engine(100, vec![4]);
        game.start().await.unwrap();

        assert!(game.decide(true).await.is_err());
        assert_eq!(game.round_total(), 0);
        assert_eq!(game.active_player().name, "Ann");
        assert_eq!(game.players()[0].banked_score(), 0);
    }

    #[tokio::test]
    async fn test_events_record_the_game() {
        let mut game = engine(8, vec![5, 3]);
        game.start().await.unwrap();

        game.roll().await.unwrap();
        game.decide(true).await.unwrap();
        game.roll().await.unwrap();
        game.decide(false).await.unwrap();

        let history = game.get_event_history().await;
        let rolled = history
            .iter()
            .filter(|e| matches!(e.event_type, GameEventType::DiceRolled))
            .count();
        assert_eq!(rolled, 2);
        assert!(history
            .iter()
            .any(|e| matches!(e.event_type, GameEventType::ScoreBanked)));
        assert!(matches!(
            history.last().unwrap().event_type,
            GameEventType::GameWon
        ));

        let recent = game.get_recent_events(1).await;
        assert!(matches!(recent[0].event_type, GameEventType::GameWon));
    }

    #[tokio::test]
    async fn test_turn_alternates_round_robin() {
        // Four bust turns in a row: Ann, Bob, Ann, Bob.
        let mut game = engine(100, vec![1, 1, 1, 1]);
        game.start().await.unwrap();

        assert_eq!(game.active_player().name, "Ann");
        game.roll().await.unwrap();
        assert_eq!(game.active_player().name, "Bob");
        // Each new turn starts fresh, awaiting a roll.
        assert_eq!(game.turn_phase(), TurnPhase::AwaitingRoll);
        assert_eq!(game.round_total(), 0);
        game.roll().await.unwrap();
        assert_eq!(game.active_player().name, "Ann");
        game.roll().await.unwrap();
        assert_eq!(game.active_player().name, "Bob");
    }
}

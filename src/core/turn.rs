use serde::{Deserialize, Serialize};

use crate::utils::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEndedBy {
    RolledOne,
    VoluntaryHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub amount_to_bank: u32,
    pub ended_by: TurnEndedBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingRoll,
    AwaitingDecision,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    pub value: u32,
    pub round_total: u32,
    pub busted: bool,
}

/// One player's turn: roll, accumulate, decide, until a 1 or a hold ends it.
///
/// The machine only consumes resolved values; the die and the continue/hold
/// prompt live with the caller.
#[derive(Debug, Clone)]
pub struct Turn {
    round_total: u32,
    phase: TurnPhase,
    outcome: Option<TurnOutcome>,
}

impl Turn {
    pub fn new() -> Self {
        Self {
            round_total: 0,
            phase: TurnPhase::AwaitingRoll,
            outcome: None,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn round_total(&self) -> u32 {
        self.round_total
    }

    pub fn outcome(&self) -> Option<TurnOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::Ended
    }

    pub fn apply_roll(&mut self, value: u32) -> GameResult<RollOutcome> {
        if self.phase != TurnPhase::AwaitingRoll {
            return Err(GameError::turn("a roll was applied while no roll was awaited"));
        }

        if value == 1 {
            // A 1 forfeits everything accumulated this turn, not just the roll.
            self.round_total = 0;
            self.phase = TurnPhase::Ended;
            self.outcome = Some(TurnOutcome {
                amount_to_bank: 0,
                ended_by: TurnEndedBy::RolledOne,
            });
            Ok(RollOutcome {
                value,
                round_total: 0,
                busted: true,
            })
        } else {
            self.round_total += value;
            self.phase = TurnPhase::AwaitingDecision;
            Ok(RollOutcome {
                value,
                round_total: self.round_total,
                busted: false,
            })
        }
    }

    pub fn decide(&mut self, keep_rolling: bool) -> GameResult<Option<TurnOutcome>> {
        if self.phase != TurnPhase::AwaitingDecision {
            return Err(GameError::turn("a decision was made without a roll to act on"));
        }

        if keep_rolling {
            self.phase = TurnPhase::AwaitingRoll;
            Ok(None)
        } else {
            let outcome = TurnOutcome {
                amount_to_bank: self.round_total,
                ended_by: TurnEndedBy::VoluntaryHold,
            };
            self.phase = TurnPhase::Ended;
            self.outcome = Some(outcome);
            Ok(Some(outcome))
        }
    }
}

impl Default for Turn {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_starts_awaiting_roll() {
        let turn = Turn::new();
        assert_eq!(turn.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(turn.round_total(), 0);
        assert!(turn.outcome().is_none());
    }

    #[test]
    fn test_rolls_accumulate_round_total() {
        let mut turn = Turn::new();

        for (value, expected_total) in [(2, 2), (3, 5), (4, 9), (5, 14), (6, 20)] {
            let roll = turn.apply_roll(value).unwrap();
            assert!(!roll.busted);
            assert_eq!(roll.round_total, expected_total);
            turn.decide(true).unwrap();
        }

        assert_eq!(turn.round_total(), 20);
    }

    #[test]
    fn test_rolling_one_forfeits_round_total() {
        let mut turn = Turn::new();
        turn.apply_roll(5).unwrap();
        turn.decide(true).unwrap();
        turn.apply_roll(3).unwrap();
        turn.decide(true).unwrap();

        let roll = turn.apply_roll(1).unwrap();
        assert!(roll.busted);
        assert_eq!(roll.round_total, 0);

        let outcome = turn.outcome().unwrap();
        assert_eq!(outcome.amount_to_bank, 0);
        assert_eq!(outcome.ended_by, TurnEndedBy::RolledOne);
        assert!(turn.is_over());
    }

    #[test]
    fn test_holding_banks_round_total() {
        let mut turn = Turn::new();
        turn.apply_roll(5).unwrap();
        turn.decide(true).unwrap();
        turn.apply_roll(3).unwrap();

        let outcome = turn.decide(false).unwrap().unwrap();
        assert_eq!(outcome.amount_to_bank, 8);
        assert_eq!(outcome.ended_by, TurnEndedBy::VoluntaryHold);
        assert!(turn.is_over());
    }

    #[test]
    fn test_continue_preserves_round_total() {
        let mut turn = Turn::new();
        turn.apply_roll(6).unwrap();
        assert!(turn.decide(true).unwrap().is_none());
        assert_eq!(turn.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(turn.round_total(), 6);
    }

    #[test]
    fn test_decision_without_roll_is_rejected() {
        let mut turn = Turn::new();
        assert!(turn.decide(true).is_err());
        assert_eq!(turn.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(turn.round_total(), 0);
    }

    #[test]
    fn test_roll_while_decision_pending_is_rejected() {
        let mut turn = Turn::new();
        turn.apply_roll(4).unwrap();
        assert!(turn.apply_roll(2).is_err());
        // The pending state must be untouched.
        assert_eq!(turn.phase(), TurnPhase::AwaitingDecision);
        assert_eq!(turn.round_total(), 4);
    }

    #[test]
    fn test_ended_turn_rejects_everything() {
        let mut turn = Turn::new();
        turn.apply_roll(1).unwrap();

        assert!(turn.apply_roll(3).is_err());
        assert!(turn.decide(false).is_err());
        assert_eq!(
            turn.outcome().unwrap().ended_by,
            TurnEndedBy::RolledOne
        );
    }
}

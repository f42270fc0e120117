use crate::model::action::ActionKind;
use crate::model::card::Card;
use crate::model::phase::Phase;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use thiserror::Error;

/// Rejection of an attempted action. Engine state is untouched whenever one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{expected} acts next, not {actual}")]
    NotYourTurn { expected: Seat, actual: Seat },
    #[error("{0} is not in hand")]
    CardNotInHand(Card),
    #[error("must follow {0} if able")]
    MustFollowSuit(Suit),
    #[error("cannot {action} during {phase}")]
    WrongPhase { action: ActionKind, phase: Phase },
    #[error("{0} was turned down and cannot be called this round")]
    TurnedSuitRejected(Suit),
    #[error("the turned card has no suit to order up")]
    NoTurnedSuit,
    #[error("no round is in progress")]
    NoRoundInProgress,
    #[error("the current round has not finished")]
    RoundInProgress,
    #[error("the game is over")]
    GameOver,
    #[error("engine invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl EngineError {
    /// Fatal errors mean the engine itself is broken; retrying is pointless.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Invariant(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{seat} holds {actual} cards, expected {expected}")]
    HandSize {
        seat: Seat,
        expected: usize,
        actual: usize,
    },
    #[error("deck ran short: needed {needed} cards, {available} left")]
    ShortDeck { needed: usize, available: usize },
}

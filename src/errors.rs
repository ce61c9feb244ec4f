//! Errors surfaced by the engine.
//!
//! A failed operation is a no-op: the table, the action log and the action
//! index are left exactly as they were.

use thiserror::Error;

use crate::essential::{ActionKind, Chips};

/// Coarse classification of a [`GameError`], for callers that branch on the
/// failure class rather than the exact variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid game parameters, raised at table construction. Fatal to the table.
    Configuration,
    /// Seat or buy-in problems, raised when adding players. Recoverable.
    Seating,
    /// Hand lifecycle misuse (starting mid-hand, acting with no hand). Recoverable.
    Lifecycle,
    /// The actor is not the player whose turn it is. Recoverable.
    Turn,
    /// Action kind or amount not permitted by the legal-action rules. Recoverable.
    ActionIllegal,
    /// Amount exceeds what the player can put in. Recoverable.
    ActionInsufficient,
    /// Broken invariant inside the engine. Unreachable under correct sequencing.
    Internal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("seat {0} does not exist at this table")]
    InvalidSeat(usize),

    #[error("seat {0} is already occupied")]
    SeatOccupied(usize),

    #[error("player {0} is already seated at this table")]
    AlreadySeated(String),

    #[error("buy-in {amount} outside the allowed range [{min}, {max}]")]
    BuyInOutOfRange { amount: Chips, min: Chips, max: Chips },

    #[error("player {0} is not at this table")]
    UnknownPlayer(String),

    #[error("a hand is already in progress")]
    HandInProgress,

    #[error("no hand in progress")]
    NoHandInProgress,

    #[error("not enough eligible players to start a hand")]
    NotEnoughPlayers,

    #[error("it is not {0}'s turn to act")]
    NotYourTurn(String),

    #[error("{kind} is not a legal action right now")]
    IllegalAction { kind: ActionKind },

    #[error("{kind} of {amount} is below the minimum of {min}")]
    AmountBelowMinimum {
        kind: ActionKind,
        amount: Chips,
        min: Chips,
    },

    #[error("{kind} of {amount} exceeds the {available} available")]
    InsufficientChips {
        kind: ActionKind,
        amount: Chips,
        available: Chips,
    },

    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidConfig(_) => ErrorKind::Configuration,
            GameError::InvalidSeat(_)
            | GameError::SeatOccupied(_)
            | GameError::AlreadySeated(_)
            | GameError::BuyInOutOfRange { .. }
            | GameError::UnknownPlayer(_) => ErrorKind::Seating,
            GameError::HandInProgress
            | GameError::NoHandInProgress
            | GameError::NotEnoughPlayers => ErrorKind::Lifecycle,
            GameError::NotYourTurn(_) => ErrorKind::Turn,
            GameError::IllegalAction { .. } | GameError::AmountBelowMinimum { .. } => {
                ErrorKind::ActionIllegal
            }
            GameError::InsufficientChips { .. } => ErrorKind::ActionInsufficient,
            GameError::Internal(_) => ErrorKind::Internal,
        }
    }
}

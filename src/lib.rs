//! Deterministic no-limit Texas Hold'em game engine.
//!
//! The [`game::Table`] owns the full hand lifecycle: seating, blinds,
//! dealing, betting-round transitions, showdown evaluation and side-pot
//! distribution. It consumes a [`deck::RandomSource`] for shuffling and a
//! [`essential::Clock`] for action timestamps, and exposes a
//! state-transition API plus a pure legal-action oracle. Given the same
//! shuffled deck and the same action sequence it produces bit-identical
//! state snapshots; transports, persistence and timers live elsewhere.

pub mod card;
pub mod deck;
pub mod errors;
pub mod essential;
pub mod evaluator;
pub mod game;
pub mod hand_history;
pub mod pots;
pub mod rules;
pub mod snapshot;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, RandomSource, SeededRng, SystemRng};
pub use errors::{ErrorKind, GameError};
pub use essential::{
    ActionKind, ActionRecord, Chips, Clock, FixedClock, GameConfig, GameMode, GameStatus,
    HandWinner, Player, PlayerStatus, Pot, Round, SystemClock,
};
pub use evaluator::{compare_hands, evaluate_hand, Category, PlayerHand};
pub use game::Table;
pub use rules::{legal_actions, LegalAction};
pub use snapshot::TableSnapshot;

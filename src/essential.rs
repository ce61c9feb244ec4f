//! Hold'em essentials: chips, rounds, statuses, actions, players and pots.

use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::errors::GameError;
use crate::evaluator::Category;

/// Chip amounts. The wire form is a decimal string (see [`chips_str`]);
/// internally everything is integer arithmetic, never floating point.
pub type Chips = u128;

/// Serde helper: chip amounts encode as decimal strings on the wire to
/// avoid any floating-point representation.
pub mod chips_str {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::Chips;

    pub fn serialize<S: Serializer>(chips: &Chips, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(chips)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Chips, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Clock injected at table creation; only used to timestamp action records.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock, for production tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Fixed clock for tests and replay.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

/// Betting rounds, advancing strictly in declaration order within a hand.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Default,
    Copy,
    Clone,
)]
pub enum Round {
    #[default]
    Ante,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    End,
}

impl Round {
    pub fn next(self) -> Round {
        match self {
            Round::Ante => Round::Preflop,
            Round::Preflop => Round::Flop,
            Round::Flop => Round::Turn,
            Round::Turn => Round::River,
            Round::River => Round::Showdown,
            Round::Showdown | Round::End => Round::End,
        }
    }

    /// Whether player actions are accepted in this round.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Round::Preflop | Round::Flop | Round::Turn | Round::River
        )
    }
}

/// A player's status over the life of a sitting.
#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default, PartialEq, Eq, Debug, Clone, Copy,
)]
pub enum PlayerStatus {
    /// Seated but yet to play a hand.
    #[default]
    NotActed,
    /// Dealt into the current hand (or ready for the next one).
    Active,
    Folded,
    AllIn,
    /// Stack hit zero at the end of a hand; sits out until a top-up.
    Busted,
    SittingOut,
    /// Hand tabled at showdown.
    Showing,
}

/// Kinds of entries in the action log. Blind posts and showdown reveals are
/// recorded by the engine; the rest are caller actions.
#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy,
)]
pub enum ActionKind {
    PostSmallBlind,
    PostBigBlind,
    Fold,
    Check,
    Bet,
    Call,
    Raise,
    AllIn,
    Show,
    Muck,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            ActionKind::PostSmallBlind => "post-small-blind",
            ActionKind::PostBigBlind => "post-big-blind",
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Bet => "bet",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
            ActionKind::Show => "show",
            ActionKind::Muck => "muck",
        };
        write!(f, "{repr}")
    }
}

/// One entry of the per-hand action log.
#[derive(BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Clone)]
pub struct ActionRecord {
    pub seat: usize,
    pub addr: String,
    pub kind: ActionKind,
    /// Chips moved by the action; the total raised to for [`ActionKind::Raise`].
    pub amount: Chips,
    pub round: Round,
    /// Strictly monotonic within a hand.
    pub index: u64,
    pub timestamp_ms: u64,
}

/// A seated player. Owned by the table; external references are by address
/// or seat only.
#[derive(BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Clone)]
pub struct Player {
    pub addr: String,
    pub seat: usize,
    pub chips: Chips,
    pub status: PlayerStatus,
    pub hole_cards: Vec<Card>,
    /// Chips committed in the current betting round.
    pub bet: Chips,
    /// Chips committed over the whole hand; pot construction reads this.
    pub total_bet: Chips,
    /// Whether the player has taken a voluntary action this round. Blind
    /// posts do not count, which is what gives the big blind its option.
    pub acted: bool,
    pub last_action: Option<ActionRecord>,
}

impl Player {
    pub fn new(addr: String, seat: usize, chips: Chips) -> Self {
        Self {
            addr,
            seat,
            chips,
            status: PlayerStatus::default(),
            hole_cards: Vec::new(),
            bet: 0,
            total_bet: 0,
            acted: false,
            last_action: None,
        }
    }

    /// Whether the player may take a betting action.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active && self.chips > 0
    }

    /// Whether the player is still contesting the current hand. Only
    /// players who were dealt in count; a seat joining mid-hand holds no
    /// cards and is not part of it.
    pub fn in_hand(&self) -> bool {
        matches!(
            self.status,
            PlayerStatus::Active | PlayerStatus::AllIn | PlayerStatus::Showing
        ) && !self.hole_cards.is_empty()
    }

    /// The "still to act" predicate: in the hand, able to act, and without
    /// a voluntary action since the round opened or was last reopened.
    pub fn owes_action(&self) -> bool {
        self.in_hand() && self.can_act() && !self.acted
    }

    /// Move up to `amount` chips from the stack into the current round's
    /// bet. Returns whether this emptied the stack and the amount actually
    /// moved. The caller flips the status on all-in.
    pub fn take_bet(&mut self, amount: Chips) -> (bool, Chips) {
        let real = amount.min(self.chips);
        self.chips -= real;
        self.bet += real;
        self.total_bet += real;
        (self.chips == 0, real)
    }
}

/// A main or side pot. `eligible` are the unfolded seats that contributed to
/// this layer; `winners` is filled at resolution.
#[derive(BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<usize>,
    pub winners: Vec<usize>,
}

/// One pot award at the end of a hand.
#[derive(BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Clone)]
pub struct HandWinner {
    pub seat: usize,
    pub addr: String,
    pub amount: Chips,
    pub pot_index: usize,
    /// `None` when the hand was won without a showdown.
    pub category: Option<Category>,
    pub best_five: Vec<Card>,
}

/// Table flavor; informational, the engine plays them identically.
#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default, PartialEq, Eq, Debug, Clone, Copy,
)]
pub enum GameMode {
    #[default]
    Cash,
    SitAndGo,
    Tournament,
}

/// Table-level status.
#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default, PartialEq, Eq, Debug, Clone, Copy,
)]
pub enum GameStatus {
    #[default]
    WaitingForPlayers,
    InProgress,
    /// Too few players can continue; no further hands will start.
    Finished,
}

/// Configuration fixed at table creation.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct GameConfig {
    #[serde(with = "chips_str")]
    pub min_buy_in: Chips,
    #[serde(with = "chips_str")]
    pub max_buy_in: Chips,
    #[serde(with = "chips_str")]
    pub small_blind: Chips,
    #[serde(with = "chips_str")]
    pub big_blind: Chips,
    pub min_players: usize,
    pub max_players: usize,
    /// Advisory action timeout; the engine ignores it, callers enforce it.
    pub timeout_ms: u64,
    pub mode: GameMode,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 || self.small_blind >= self.big_blind {
            return Err(GameError::InvalidConfig(format!(
                "blinds must satisfy 0 < small ({}) < big ({})",
                self.small_blind, self.big_blind
            )));
        }
        if self.min_buy_in > self.max_buy_in {
            return Err(GameError::InvalidConfig(format!(
                "min buy-in {} exceeds max buy-in {}",
                self.min_buy_in, self.max_buy_in
            )));
        }
        if self.min_players < 2 || self.min_players > self.max_players || self.max_players > 9 {
            return Err(GameError::InvalidConfig(format!(
                "player bounds must satisfy 2 <= min ({}) <= max ({}) <= 9",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_buy_in: 200,
            max_buy_in: 2_000,
            small_blind: 10,
            big_blind: 20,
            min_players: 2,
            max_players: 9,
            timeout_ms: 30_000,
            mode: GameMode::Cash,
        }
    }
}

//! Wire-form state export for external consumers.
//!
//! Chip amounts are decimal strings, cards are their two-character text
//! form. Hole cards are exposed as-is: the engine is deterministic and
//! audit-friendly, redaction per viewer is the transport's job.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::essential::{
    chips_str, ActionKind, ActionRecord, Chips, GameConfig, GameStatus, HandWinner, PlayerStatus,
    Round,
};
use crate::game::Table;
use crate::rules::LegalAction;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSnapshot {
    pub seat: usize,
    pub addr: String,
    pub kind: ActionKind,
    #[serde(with = "chips_str")]
    pub amount: Chips,
    pub round: Round,
    pub index: u64,
    pub timestamp_ms: u64,
}

impl From<&ActionRecord> for ActionSnapshot {
    fn from(record: &ActionRecord) -> Self {
        Self {
            seat: record.seat,
            addr: record.addr.clone(),
            kind: record.kind,
            amount: record.amount,
            round: record.round,
            index: record.index,
            timestamp_ms: record.timestamp_ms,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub addr: String,
    pub seat: usize,
    #[serde(with = "chips_str")]
    pub stack: Chips,
    pub status: PlayerStatus,
    pub hole_cards: Vec<Card>,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    /// Chips committed in the current betting round.
    #[serde(with = "chips_str")]
    pub sum_of_bets: Chips,
    /// Chips committed over the whole hand.
    #[serde(with = "chips_str")]
    pub total_bet: Chips,
    pub last_action: Option<ActionSnapshot>,
    pub legal_actions: Vec<LegalAction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotSnapshot {
    #[serde(with = "chips_str")]
    pub amount: Chips,
    pub eligible: Vec<usize>,
    pub winners: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerSnapshot {
    pub seat: usize,
    pub addr: String,
    #[serde(with = "chips_str")]
    pub amount: Chips,
    pub pot_index: usize,
    /// Rank class name; absent when the pot was won without a showdown.
    pub rank: Option<String>,
    pub best_five: Vec<Card>,
}

impl From<&HandWinner> for WinnerSnapshot {
    fn from(winner: &HandWinner) -> Self {
        Self {
            seat: winner.seat,
            addr: winner.addr.clone(),
            amount: winner.amount,
            pot_index: winner.pot_index,
            rank: winner.category.map(|c| c.to_string()),
            best_five: winner.best_five.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub address: String,
    pub config: GameConfig,
    pub status: GameStatus,
    pub hand_number: u64,
    pub round: Round,
    pub dealer: Option<usize>,
    pub small_blind_seat: Option<usize>,
    pub big_blind_seat: Option<usize>,
    pub next_to_act: Option<usize>,
    pub last_acted_seat: Option<usize>,
    pub players: Vec<PlayerSnapshot>,
    pub community_cards: Vec<Card>,
    /// Deterministic deck serialization for audit: dealt cards followed by
    /// remaining cards.
    pub deck: String,
    pub pots: Vec<PotSnapshot>,
    #[serde(with = "chips_str")]
    pub street_bet: Chips,
    #[serde(with = "chips_str")]
    pub min_raise: Chips,
    pub action_index: u64,
    pub action_log: Vec<ActionSnapshot>,
    pub winners: Vec<WinnerSnapshot>,
}

impl TableSnapshot {
    pub fn capture(table: &Table) -> Self {
        let players = table
            .seats()
            .iter()
            .flatten()
            .map(|p| PlayerSnapshot {
                addr: p.addr.clone(),
                seat: p.seat,
                stack: p.chips,
                status: p.status,
                hole_cards: p.hole_cards.clone(),
                is_dealer: table.dealer_seat() == Some(p.seat),
                is_small_blind: table.small_blind_seat() == Some(p.seat),
                is_big_blind: table.big_blind_seat() == Some(p.seat),
                sum_of_bets: p.bet,
                total_bet: p.total_bet,
                last_action: p.last_action.as_ref().map(ActionSnapshot::from),
                legal_actions: table.legal_actions(p.seat),
            })
            .collect();

        Self {
            address: table.addr().to_string(),
            config: table.config().clone(),
            status: table.status(),
            hand_number: table.hand_number(),
            round: table.round(),
            dealer: table.dealer_seat(),
            small_blind_seat: table.small_blind_seat(),
            big_blind_seat: table.big_blind_seat(),
            next_to_act: table.next_to_act(),
            last_acted_seat: table.last_acted_seat(),
            players,
            community_cards: table.board().to_vec(),
            deck: table.deck().audit_string(),
            pots: table
                .pots()
                .iter()
                .map(|p| PotSnapshot {
                    amount: p.amount,
                    eligible: p.eligible.clone(),
                    winners: p.winners.clone(),
                })
                .collect(),
            street_bet: table.street_bet(),
            min_raise: table.min_raise(),
            action_index: table.action_index(),
            action_log: table
                .hand_history()
                .actions
                .iter()
                .map(ActionSnapshot::from)
                .collect(),
            winners: table.winners().iter().map(WinnerSnapshot::from).collect(),
        }
    }
}

//! Per-hand history: blinds, the action log, the board, showdown reveals
//! and chip deltas.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::card::Card;
use crate::essential::{ActionRecord, Chips, Round};
use crate::evaluator::Category;

#[derive(Debug, BorshSerialize, BorshDeserialize, PartialEq, Eq, Clone)]
pub enum ChipsChange {
    Add(Chips),
    Sub(Chips),
}

#[derive(Debug, BorshSerialize, BorshDeserialize, PartialEq, Eq, Clone, Copy)]
pub enum BlindType {
    Sb,
    Bb,
}

#[derive(Debug, BorshSerialize, BorshDeserialize, PartialEq, Eq, Clone)]
pub struct BlindPost {
    pub seat: usize,
    pub addr: String,
    pub blind_type: BlindType,
    pub amount: Chips,
}

/// A hand revealed at showdown.
#[derive(Debug, BorshSerialize, BorshDeserialize, PartialEq, Eq, Clone)]
pub struct Showdown {
    pub hole_cards: Vec<Card>,
    pub category: Category,
    pub picks: Vec<Card>,
}

#[derive(Debug, Default, BorshSerialize, BorshDeserialize, PartialEq, Eq, Clone)]
pub struct HandHistory {
    pub board: Vec<Card>,
    pub blinds: Vec<BlindPost>,
    /// The total order of everything that happened this hand, blind posts
    /// included. Indices are strictly monotonic.
    pub actions: Vec<ActionRecord>,
    // Seat -> showdown info
    pub showdowns: BTreeMap<usize, Showdown>,
    // Seat -> chips change
    pub chips_change: BTreeMap<usize, ChipsChange>,
}

impl HandHistory {
    pub fn set_board(&mut self, board: Vec<Card>) {
        self.board = board;
    }

    pub fn add_blind(&mut self, blind: BlindPost) {
        self.blinds.push(blind);
    }

    pub fn add_action(&mut self, action: ActionRecord) {
        self.actions.push(action);
    }

    pub fn add_showdown(&mut self, seat: usize, showdown: Showdown) {
        self.showdowns.insert(seat, showdown);
    }

    /// Record how each player's stack moved: prize received minus chips
    /// contributed. Players who broke exactly even are left out.
    pub fn set_chips_change(&mut self, results: &BTreeMap<usize, (Chips, Chips)>) {
        for (&seat, &(prize, contributed)) in results {
            if prize > contributed {
                self.chips_change
                    .insert(seat, ChipsChange::Add(prize - contributed));
            } else if contributed > prize {
                self.chips_change
                    .insert(seat, ChipsChange::Sub(contributed - prize));
            }
        }
    }

    /// The actions of one street, in order.
    pub fn street_actions(&self, round: Round) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter().filter(move |a| a.round == round)
    }
}

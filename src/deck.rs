//! The per-hand deck: 52 distinct cards behind a deal cursor.
//!
//! Cards before the cursor have been dealt; cards at and after it remain.
//! Shuffling is delegated to an injected [`RandomSource`] so hands can be
//! replayed from a seed.

use borsh::{BorshDeserialize, BorshSerialize};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::card::{Card, Rank, Suit};
use crate::errors::GameError;

/// Source of permutations for deck shuffling.
pub trait RandomSource {
    fn shuffle_cards(&mut self, cards: &mut [Card]);
}

/// Thread-local system randomness, for production tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut rand::thread_rng());
    }
}

/// Deterministic randomness for tests and replay. The same seed always
/// produces the same sequence of shuffles.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.inner);
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// A fresh unshuffled deck: Clubs through Spades, Two through Ace.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades] {
            for rank in [
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
                Rank::Nine,
                Rank::Ten,
                Rank::Jack,
                Rank::Queen,
                Rank::King,
                Rank::Ace,
            ] {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards, cursor: 0 }
    }

    /// Permute the whole sequence and reset the cursor.
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        rng.shuffle_cards(&mut self.cards);
        self.cursor = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Advance the cursor by `n` and return those cards. Dealing more cards
    /// than remain cannot happen under correct hand sequencing.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if self.remaining() < n {
            return Err(GameError::Internal("deck exhausted"));
        }
        let dealt = self.cards[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Ok(dealt)
    }

    /// Advance the cursor by one without returning the card.
    pub fn burn(&mut self) -> Result<(), GameError> {
        if self.remaining() == 0 {
            return Err(GameError::Internal("deck exhausted"));
        }
        self.cursor += 1;
        Ok(())
    }

    pub fn dealt_cards(&self) -> &[Card] {
        &self.cards[..self.cursor]
    }

    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.cursor..]
    }

    /// Deterministic serialization for audit: dealt cards followed by
    /// remaining cards.
    pub fn audit_string(&self) -> String {
        self.cards
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

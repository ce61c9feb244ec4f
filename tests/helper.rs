#![allow(dead_code)]

//! Helper functions used in tests

use std::collections::HashSet;
use std::str::FromStr;

use holdem_engine::{
    Card, Chips, FixedClock, GameConfig, GameMode, RandomSource, SeededRng, Table,
};

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";
pub const CAROL: &str = "carol";
pub const DAVE: &str = "dave";

pub const TS: u64 = 1_700_000_000_000;

pub fn cards(strs: &[&str]) -> Vec<Card> {
    strs.iter().map(|s| Card::from_str(s).unwrap()).collect()
}

/// Random source that stacks the deck: the given cards come off the top in
/// order, the rest of the pack follows in standard order. Lets a test pin
/// hole cards and the board the way a real deal would produce them.
pub struct RiggedDeck {
    order: Vec<Card>,
}

impl RiggedDeck {
    pub fn new(first: &[&str]) -> Self {
        Self { order: cards(first) }
    }
}

impl RandomSource for RiggedDeck {
    fn shuffle_cards(&mut self, deck: &mut [Card]) {
        let prefix: HashSet<Card> = self.order.iter().copied().collect();
        assert_eq!(prefix.len(), self.order.len(), "rigged cards must be distinct");
        let mut arranged = self.order.clone();
        arranged.extend(deck.iter().copied().filter(|c| !prefix.contains(c)));
        assert_eq!(arranged.len(), deck.len());
        deck.copy_from_slice(&arranged);
    }
}

pub fn blinds_5_10() -> GameConfig {
    GameConfig {
        min_buy_in: 10,
        max_buy_in: 10_000,
        small_blind: 5,
        big_blind: 10,
        min_players: 2,
        max_players: 9,
        timeout_ms: 30_000,
        mode: GameMode::Cash,
    }
}

pub fn table_with(
    config: GameConfig,
    rng: Box<dyn RandomSource>,
    buyins: &[(&str, Chips)],
) -> Table {
    let mut table = Table::new(
        "0xtable".to_string(),
        config,
        rng,
        Box::new(FixedClock(TS)),
    )
    .unwrap();
    for (seat, (addr, chips)) in buyins.iter().enumerate() {
        table.add_player(addr, seat, *chips).unwrap();
    }
    table
}

pub fn seeded_table(seed: u64, buyins: &[(&str, Chips)]) -> Table {
    table_with(blinds_5_10(), Box::new(SeededRng::from_seed(seed)), buyins)
}

pub fn rigged_table(buyins: &[(&str, Chips)], order: &[&str]) -> Table {
    table_with(blinds_5_10(), Box::new(RiggedDeck::new(order)), buyins)
}

/// Total chips on the table mid-hand: stacks plus everything contributed to
/// the hand so far.
pub fn chips_in_play(table: &Table) -> Chips {
    table
        .seats()
        .iter()
        .flatten()
        .map(|p| p.chips + p.total_bet)
        .sum()
}

/// Total chips in stacks; after a hand has paid out this is the whole
/// economy again.
pub fn stack_total(table: &Table) -> Chips {
    table.seats().iter().flatten().map(|p| p.chips).sum()
}

pub fn stack_of(table: &Table, addr: &str) -> Chips {
    table.player_by_addr(addr).unwrap().chips
}

//! Main and side pot construction from per-hand contribution totals.
//!
//! Contributions are layered by all-in level: each distinct contribution
//! level forms one pot, funded by everyone who reached that level and
//! contested only by those of them who have not folded. Pot 0 is the lowest
//! layer, the one every showdown player is eligible for.

use std::collections::BTreeSet;

use crate::essential::{Chips, Pot};

/// Build the pot layering. `contributions` holds `(seat, per-hand total)`
/// pairs (zero totals are ignored; folded players' chips stay in the pots
/// they funded); `in_hand` is the set of seats still contesting the hand.
pub fn build_pots(contributions: &[(usize, Chips)], in_hand: &BTreeSet<usize>) -> Vec<Pot> {
    let mut entries: Vec<(usize, Chips)> = contributions
        .iter()
        .copied()
        .filter(|(_, total)| *total > 0)
        .collect();
    entries.sort_by(|(s1, c1), (s2, c2)| c1.cmp(c2).then(s1.cmp(s2)));

    let mut levels: Vec<Chips> = entries.iter().map(|(_, total)| *total).collect();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut prev: Chips = 0;
    for level in levels {
        let layer = level - prev;
        let mut contributors: Vec<usize> = entries
            .iter()
            .filter(|(_, total)| *total >= level)
            .map(|(seat, _)| *seat)
            .collect();
        contributors.sort_unstable();
        let amount = layer * contributors.len() as Chips;
        let eligible: Vec<usize> = contributors
            .iter()
            .copied()
            .filter(|seat| in_hand.contains(seat))
            .collect();

        match pots.last_mut() {
            // A layer funded only by folded players cannot be contested
            // (its chips sink into the pot below), and adjacent layers
            // contested by the same players are one pot.
            Some(last) if eligible.is_empty() || last.eligible == eligible => {
                last.amount += amount
            }
            _ => pots.push(Pot {
                amount,
                eligible,
                winners: Vec::new(),
            }),
        }
        prev = level;
    }
    pots
}

pub fn total(pots: &[Pot]) -> Chips {
    pots.iter().map(|p| p.amount).sum()
}

/// Equal split by integer division: per-winner share and the odd remainder.
pub fn split(amount: Chips, winners: usize) -> (Chips, Chips) {
    let n = winners as Chips;
    (amount / n, amount % n)
}

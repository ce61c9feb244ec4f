//! Hand evaluation: rank classes, kicker scores and best-five selection.
//!
//! A hand's strength is `(category, score)`. The score folds the five card
//! ranks, ordered by relevance (quads before the kicker, trips before the
//! pair, pairs before kickers), into a base-15 positional integer, so within
//! a category a strictly better set of kickers always scores strictly
//! higher. In the wheel the ace counts as 1.

use core::fmt;
use std::cmp::Ordering;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::errors::GameError;

#[derive(
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Copy,
    Clone,
)]
pub enum Category {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        };
        write!(f, "{repr}")
    }
}

/// A ranked five-card hand: its category, the five cards in relevance
/// order, and the kicker score breaking ties within the category.
#[derive(BorshSerialize, BorshDeserialize, Debug, PartialEq, Eq, Clone)]
pub struct PlayerHand {
    pub category: Category,
    pub picks: Vec<Card>,
    pub score: u32,
}

impl PlayerHand {
    pub fn value(&self) -> (Category, u32) {
        (self.category, self.score)
    }
}

/// Compare two ranked hands. Equal values are genuine ties; suits never
/// break them.
pub fn compare(a: &PlayerHand, b: &PlayerHand) -> Ordering {
    a.value().cmp(&b.value())
}

/// Rank the best five cards out of two hole cards plus five community
/// cards, scanning all 21 five-card subsets.
pub fn evaluate_hand(hole: &[Card], community: &[Card]) -> Result<PlayerHand, GameError> {
    let mut all = Vec::with_capacity(7);
    all.extend_from_slice(hole);
    all.extend_from_slice(community);
    if all.len() != 7 {
        return Err(GameError::Internal("hand evaluation requires exactly 7 cards"));
    }

    let mut best: Option<PlayerHand> = None;
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            let mut five = [all[0]; 5];
            let mut k = 0;
            for (idx, card) in all.iter().enumerate() {
                if idx != skip_a && idx != skip_b {
                    five[k] = *card;
                    k += 1;
                }
            }
            let (category, score, picks) = rank_five(five);
            let better = match &best {
                None => true,
                Some(b) => (category, score) > (b.category, b.score),
            };
            if better {
                best = Some(PlayerHand {
                    category,
                    picks: picks.to_vec(),
                    score,
                });
            }
        }
    }

    best.ok_or(GameError::Internal("no five-card subset evaluated"))
}

/// Compare two holes over the same board: `Greater` when `hole_a` wins,
/// `Less` when `hole_b` wins.
pub fn compare_hands(
    hole_a: &[Card],
    hole_b: &[Card],
    community: &[Card],
) -> Result<Ordering, GameError> {
    let a = evaluate_hand(hole_a, community)?;
    let b = evaluate_hand(hole_b, community)?;
    Ok(compare(&a, &b))
}

/// Rank exactly five cards. Returns the category, the kicker score and the
/// cards in relevance order.
fn rank_five(cards: [Card; 5]) -> (Category, u32, [Card; 5]) {
    let mut sorted = cards;
    sorted.sort_by(|a, b| b.rank.value().cmp(&a.rank.value()));
    let values: Vec<u8> = sorted.iter().map(|c| c.rank.value()).collect();

    let flush = sorted.iter().all(|c| c.suit == sorted[0].suit);
    let wheel = values == [14, 5, 4, 3, 2];
    let straight = wheel || values.windows(2).all(|w| w[0] == w[1] + 1);

    if straight {
        let (ordered, score) = if wheel {
            // The ace moves to the end and counts as 1.
            let ordered = [sorted[1], sorted[2], sorted[3], sorted[4], sorted[0]];
            (ordered, fold_score(&[5, 4, 3, 2, 1]))
        } else {
            (sorted, fold_score(&values))
        };
        let category = if flush && !wheel && values[0] == 14 {
            Category::RoyalFlush
        } else if flush {
            Category::StraightFlush
        } else {
            Category::Straight
        };
        return (category, score, ordered);
    }

    // Group equal ranks (adjacent after the sort), then order groups by
    // count, then rank. Flattening the groups yields the relevance order.
    let mut groups: Vec<Vec<Card>> = Vec::with_capacity(5);
    for card in sorted {
        match groups.last_mut() {
            Some(group) if group[0].rank == card.rank => group.push(card),
            _ => groups.push(vec![card]),
        }
    }
    groups.sort_by(|a, b| {
        (b.len(), b[0].rank.value()).cmp(&(a.len(), a[0].rank.value()))
    });

    let shape: Vec<usize> = groups.iter().map(Vec::len).collect();
    let category = match shape.as_slice() {
        [4, 1] => Category::FourOfAKind,
        [3, 2] => Category::FullHouse,
        _ if flush => Category::Flush,
        [3, 1, 1] => Category::ThreeOfAKind,
        [2, 2, 1] => Category::TwoPair,
        [2, 1, 1, 1] => Category::OnePair,
        _ => Category::HighCard,
    };

    let mut ordered = [sorted[0]; 5];
    let mut k = 0;
    for group in &groups {
        for card in group {
            ordered[k] = *card;
            k += 1;
        }
    }
    let ordered_values: Vec<u8> = ordered.iter().map(|c| c.rank.value()).collect();
    (category, fold_score(&ordered_values), ordered)
}

fn fold_score(values: &[u8]) -> u32 {
    values.iter().fold(0u32, |acc, &v| acc * 15 + v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(strs: &[&str]) -> Vec<Card> {
        strs.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn eval(hole: &[&str], board: &[&str]) -> PlayerHand {
        evaluate_hand(&cards(hole), &cards(board)).unwrap()
    }

    #[test]
    fn wheel_is_a_five_high_straight() {
        let hand = eval(&["AS", "2D"], &["3H", "4C", "5S", "KH", "QH"]);
        assert_eq!(hand.category, Category::Straight);
        // Five-high: the ace ranks low.
        assert_eq!(hand.picks[0].to_string(), "5S");
        assert_eq!(hand.picks[4].to_string(), "AS");

        let six_high = eval(&["6S", "2D"], &["3H", "4C", "5S", "KH", "QH"]);
        assert_eq!(six_high.category, Category::Straight);
        assert!(six_high.score > hand.score);

        let two_pair = eval(&["KS", "QD"], &["3H", "4C", "5S", "KH", "QH"]);
        assert_eq!(two_pair.category, Category::TwoPair);
        assert_eq!(compare(&hand, &two_pair), std::cmp::Ordering::Greater);
    }

    #[test]
    fn royal_flush_beats_king_high_straight_flush() {
        let royal = eval(&["AS", "KS"], &["QS", "JS", "TS", "2D", "3C"]);
        assert_eq!(royal.category, Category::RoyalFlush);

        let king_high = eval(&["9S", "KS"], &["QS", "JS", "TS", "2D", "3C"]);
        assert_eq!(king_high.category, Category::StraightFlush);
        assert_eq!(compare(&royal, &king_high), std::cmp::Ordering::Greater);
    }

    #[test]
    fn steel_wheel_is_a_straight_flush() {
        let hand = eval(&["AH", "2H"], &["3H", "4H", "5H", "KS", "QD"]);
        assert_eq!(hand.category, Category::StraightFlush);

        let six_high = eval(&["6H", "2H"], &["3H", "4H", "5H", "KS", "QD"]);
        assert_eq!(six_high.category, Category::StraightFlush);
        assert!(six_high.score > hand.score);
    }

    #[test]
    fn categories_classify() {
        assert_eq!(eval(&["AS", "AH"], &["AD", "AC", "4H", "9S", "2D"]).category, Category::FourOfAKind);
        assert_eq!(eval(&["AS", "AH"], &["AD", "KC", "KH", "9S", "2D"]).category, Category::FullHouse);
        assert_eq!(eval(&["AS", "9S"], &["KS", "4S", "2S", "QD", "JD"]).category, Category::Flush);
        assert_eq!(eval(&["AS", "AH"], &["AD", "KC", "QH", "9S", "2D"]).category, Category::ThreeOfAKind);
        assert_eq!(eval(&["AS", "KH"], &["AD", "KC", "QH", "9S", "2D"]).category, Category::TwoPair);
        assert_eq!(eval(&["AS", "KH"], &["AD", "JC", "QH", "9S", "2D"]).category, Category::OnePair);
        assert_eq!(eval(&["AS", "KH"], &["7D", "JC", "QH", "9S", "2D"]).category, Category::HighCard);
    }

    #[test]
    fn kickers_break_ties_within_a_category() {
        let board = ["QS", "QH", "KD", "8C", "5D"];
        let ace_kicker = eval(&["9D", "AH"], &board);
        let nine_kicker = eval(&["9H", "4S"], &board);
        assert_eq!(ace_kicker.category, Category::OnePair);
        assert_eq!(nine_kicker.category, Category::OnePair);
        assert_eq!(compare(&ace_kicker, &nine_kicker), std::cmp::Ordering::Greater);
    }

    #[test]
    fn board_plays_for_both_is_a_genuine_tie() {
        let board = ["AS", "KS", "QD", "JC", "TH"];
        let a = eval(&["2D", "3H"], &board);
        let b = eval(&["2C", "3S"], &board);
        assert_eq!(a.category, Category::Straight);
        assert_eq!(compare(&a, &b), std::cmp::Ordering::Equal);
    }

    #[test]
    fn evaluation_is_symmetric_under_permutation() {
        let base = eval(&["AS", "2D"], &["3H", "4C", "5S", "KH", "QH"]);
        let permuted = eval(&["KH", "QH"], &["5S", "4C", "3H", "2D", "AS"]);
        assert_eq!(base.category, permuted.category);
        assert_eq!(base.score, permuted.score);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let first = eval(&["TH", "TD"], &["TS", "2C", "2H", "9S", "9D"]);
        for _ in 0..10 {
            let again = eval(&["TH", "TD"], &["TS", "2C", "2H", "9S", "9D"]);
            assert_eq!(first, again);
        }
        assert_eq!(first.category, Category::FullHouse);
    }

    #[test]
    fn rejects_wrong_card_counts() {
        assert!(evaluate_hand(&cards(&["AS"]), &cards(&["3H", "4C", "5S", "KH", "QH"])).is_err());
    }
}

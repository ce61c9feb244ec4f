//! Split pots and the odd chip.

mod helper;

use helper::*;
use holdem_engine::{ActionKind, Category, Round};

// Two players chop a 47-chip pot; the odd chip goes to the eligible winner
// closest to the left of the dealer.
#[test]
fn odd_chip_goes_left_of_the_dealer() {
    let mut table = rigged_table(
        &[(ALICE, 500), (BOB, 500), (CAROL, 500)],
        &[
            // Deal order with the button at seat 0: Bob, Carol, Alice.
            "7C", "2C", "2D", "8D", "3S", "3H",
            "4H", "AS", "KS", "QD",
            "5C", "JC",
            "6H", "TH",
        ],
    );
    table.start_hand().unwrap();

    // Alice raises to 21, Bob folds his small blind, Carol calls.
    table.perform_action(ALICE, ActionKind::Raise, 21).unwrap();
    table.perform_action(BOB, ActionKind::Fold, 0).unwrap();
    table.perform_action(CAROL, ActionKind::Call, 0).unwrap();

    // Check it down; the broadway board plays for both.
    for _ in 0..3 {
        table.perform_action(CAROL, ActionKind::Check, 0).unwrap();
        table.perform_action(ALICE, ActionKind::Check, 0).unwrap();
    }
    assert_eq!(table.round(), Round::End);

    // Pot is 21 + 21 + Bob's dead 5 = 47. Carol sits left of the dealer,
    // so she receives 24 and Alice 23.
    assert_eq!(table.pots().len(), 1);
    assert_eq!(table.pots()[0].amount, 47);
    assert_eq!(table.pots()[0].winners, vec![0, 2]);
    assert_eq!(stack_of(&table, CAROL), 500 - 21 + 24);
    assert_eq!(stack_of(&table, ALICE), 500 - 21 + 23);
    assert_eq!(stack_of(&table, BOB), 495);
    assert_eq!(stack_total(&table), 1_500);

    // Both winners hold the same straight off the board.
    assert!(table
        .winners()
        .iter()
        .all(|w| w.category == Some(Category::Straight)));
}

// An even chop leaves no remainder and identical shares.
#[test]
fn even_split_has_no_odd_chip() {
    let mut table = rigged_table(
        &[(ALICE, 500), (BOB, 500)],
        &[
            "2C", "2D", "3S", "3H",
            "4H", "AS", "KS", "QD",
            "5C", "JC",
            "6H", "TH",
        ],
    );
    table.start_hand().unwrap();

    table.perform_action(ALICE, ActionKind::Call, 0).unwrap();
    table.perform_action(BOB, ActionKind::Check, 0).unwrap();
    for _ in 0..3 {
        table.perform_action(BOB, ActionKind::Check, 0).unwrap();
        table.perform_action(ALICE, ActionKind::Check, 0).unwrap();
    }

    assert_eq!(table.round(), Round::End);
    assert_eq!(stack_of(&table, ALICE), 500);
    assert_eq!(stack_of(&table, BOB), 500);
    assert_eq!(stack_total(&table), 1_000);
}

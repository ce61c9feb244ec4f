//! Wire form of the exported state: decimal-string chips, two-character
//! cards, and a lossless round trip.

mod helper;

use helper::*;
use holdem_engine::{ActionKind, TableSnapshot};

#[test]
fn chips_serialize_as_decimal_strings() {
    let mut table = seeded_table(7, &[(ALICE, 500), (BOB, 500)]);
    table.start_hand().unwrap();

    let snapshot = TableSnapshot::capture(&table);
    let value: serde_json::Value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["players"][0]["stack"], "495");
    assert_eq!(value["players"][1]["stack"], "490");
    assert_eq!(value["players"][0]["sum_of_bets"], "5");
    assert_eq!(value["street_bet"], "10");
    assert_eq!(value["config"]["big_blind"], "10");
    assert_eq!(value["action_log"][1]["amount"], "10");
}

#[test]
fn cards_serialize_as_rank_then_suit() {
    let mut table = rigged_table(
        &[(ALICE, 500), (BOB, 500)],
        &["KS", "AS", "KH", "AH", "4C", "2C", "7D", "9H"],
    );
    table.start_hand().unwrap();

    let value = serde_json::to_value(TableSnapshot::capture(&table)).unwrap();
    assert_eq!(value["players"][0]["hole_cards"][0], "AS");
    assert_eq!(value["players"][1]["hole_cards"][0], "KS");

    // The audit deck lists every card, dealt first.
    let deck = value["deck"].as_str().unwrap();
    let listed: Vec<&str> = deck.split(' ').collect();
    assert_eq!(listed.len(), 52);
    assert_eq!(&listed[..4], &["KS", "AS", "KH", "AH"]);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut table = seeded_table(11, &[(ALICE, 500), (BOB, 500), (CAROL, 500)]);
    table.start_hand().unwrap();
    table.perform_action(ALICE, ActionKind::Raise, 30).unwrap();

    let snapshot = TableSnapshot::capture(&table);
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: TableSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

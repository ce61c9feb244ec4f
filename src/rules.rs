//! The legal-action oracle: what the current actor may do and within which
//! bounds. Pure reads, no mutation.

use serde::{Deserialize, Serialize};

use crate::essential::{ActionKind, Chips, chips_str};
use crate::game::Table;

/// One permitted action with its amount bounds. `min`/`max` are zero for
/// the amountless kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAction {
    pub kind: ActionKind,
    #[serde(with = "chips_str")]
    pub min: Chips,
    #[serde(with = "chips_str")]
    pub max: Chips,
}

impl LegalAction {
    fn new(kind: ActionKind, min: Chips, max: Chips) -> Self {
        Self { kind, min, max }
    }
}

/// Legal actions for `seat`. Empty unless `seat` is the current actor in a
/// betting round.
pub fn legal_actions(table: &Table, seat: usize) -> Vec<LegalAction> {
    if !table.round().is_betting() || table.next_to_act() != Some(seat) {
        return Vec::new();
    }
    let Some(player) = table.player(seat) else {
        return Vec::new();
    };
    if !player.can_act() {
        return Vec::new();
    }

    let street_bet = table.street_bet();
    let min_raise = table.min_raise();
    let big_blind = table.config().big_blind;
    let stack = player.chips;
    let bet = player.bet;

    let mut actions = Vec::new();

    if street_bet > bet {
        // Never fold for free: Fold only appears when a check isn't available.
        actions.push(LegalAction::new(ActionKind::Fold, 0, 0));
        let call = (street_bet - bet).min(stack);
        actions.push(LegalAction::new(ActionKind::Call, call, call));
    } else {
        actions.push(LegalAction::new(ActionKind::Check, 0, 0));
    }

    if street_bet == 0 && stack >= big_blind {
        actions.push(LegalAction::new(ActionKind::Bet, big_blind, stack));
    }

    if street_bet > 0 && stack + bet >= street_bet + min_raise {
        actions.push(LegalAction::new(
            ActionKind::Raise,
            street_bet + min_raise,
            stack + bet,
        ));
    }

    if stack > 0 {
        actions.push(LegalAction::new(ActionKind::AllIn, stack, stack));
    }

    actions
}

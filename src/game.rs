//! The table: the hand-lifecycle state machine and the sole mutator of
//! seating, pots and player records.
//!
//! Every mutation goes through one of the public operations, each of which
//! is atomic: it either completes fully or fails with a [`GameError`] and no
//! observable state change. The externally observable state after action N
//! is purely a function of the shuffled deck and actions 1..N.

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};

use crate::card::Card;
use crate::deck::{Deck, RandomSource};
use crate::errors::GameError;
use crate::essential::{
    ActionKind, ActionRecord, Chips, Clock, GameConfig, GameStatus, HandWinner, Player,
    PlayerStatus, Pot, Round,
};
use crate::evaluator::{self, Category, PlayerHand};
use crate::hand_history::{BlindPost, BlindType, HandHistory, Showdown};
use crate::pots;
use crate::rules::{self, LegalAction};

pub struct Table {
    addr: String,
    config: GameConfig,
    /// Fixed-size seat array; next-to-act is a clockwise scan over it.
    seats: Vec<Option<Player>>,
    status: GameStatus,
    hand_number: u64,
    round: Round,
    board: Vec<Card>,
    deck: Deck,
    pots: Vec<Pot>,
    btn: Option<usize>,
    sb_seat: Option<usize>,
    bb_seat: Option<usize>,
    next_to_act: Option<usize>,
    last_acted_seat: Option<usize>,
    /// Highest per-round bet on the table; the amount to match.
    street_bet: Chips,
    /// Size of the last full bet or raise increment. A sub-minimum all-in
    /// moves `street_bet` without touching this.
    min_raise: Chips,
    action_index: u64,
    hand_history: HandHistory,
    winners: Vec<HandWinner>,
    to_remove: Vec<usize>,
    to_sit_out: Vec<usize>,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("addr", &self.addr)
            .field("hand_number", &self.hand_number)
            .field("round", &self.round)
            .field("btn", &self.btn)
            .field("next_to_act", &self.next_to_act)
            .field("street_bet", &self.street_bet)
            .field("min_raise", &self.min_raise)
            .field("pots", &self.pots)
            .finish_non_exhaustive()
    }
}

impl Table {
    pub fn new(
        addr: String,
        config: GameConfig,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let seats = vec![None; config.max_players];
        Ok(Self {
            addr,
            min_raise: config.big_blind,
            config,
            seats,
            status: GameStatus::default(),
            hand_number: 0,
            round: Round::default(),
            board: Vec::with_capacity(5),
            deck: Deck::standard(),
            pots: Vec::new(),
            btn: None,
            sb_seat: None,
            bb_seat: None,
            next_to_act: None,
            last_acted_seat: None,
            street_bet: 0,
            action_index: 0,
            hand_history: HandHistory::default(),
            winners: Vec::new(),
            to_remove: Vec::new(),
            to_sit_out: Vec::new(),
            rng,
            clock,
        })
    }

    // ----- read access -----

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn dealer_seat(&self) -> Option<usize> {
        self.btn
    }

    pub fn small_blind_seat(&self) -> Option<usize> {
        self.sb_seat
    }

    pub fn big_blind_seat(&self) -> Option<usize> {
        self.bb_seat
    }

    pub fn next_to_act(&self) -> Option<usize> {
        self.next_to_act
    }

    pub fn last_acted_seat(&self) -> Option<usize> {
        self.last_acted_seat
    }

    pub fn street_bet(&self) -> Chips {
        self.street_bet
    }

    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }

    pub fn action_index(&self) -> u64 {
        self.action_index
    }

    pub fn hand_history(&self) -> &HandHistory {
        &self.hand_history
    }

    pub fn winners(&self) -> &[HandWinner] {
        &self.winners
    }

    pub fn seats(&self) -> &[Option<Player>] {
        &self.seats
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.seats.get(seat).and_then(Option::as_ref)
    }

    pub fn player_by_addr(&self, addr: &str) -> Option<&Player> {
        self.seats.iter().flatten().find(|p| p.addr == addr)
    }

    pub fn legal_actions(&self, seat: usize) -> Vec<LegalAction> {
        rules::legal_actions(self, seat)
    }

    // ----- seating -----

    pub fn add_player(&mut self, addr: &str, seat: usize, buy_in: Chips) -> Result<(), GameError> {
        if seat >= self.config.max_players {
            return Err(GameError::InvalidSeat(seat));
        }
        if self.seats[seat].is_some() {
            return Err(GameError::SeatOccupied(seat));
        }
        if self.player_by_addr(addr).is_some() {
            return Err(GameError::AlreadySeated(addr.to_string()));
        }
        if buy_in < self.config.min_buy_in || buy_in > self.config.max_buy_in {
            return Err(GameError::BuyInOutOfRange {
                amount: buy_in,
                min: self.config.min_buy_in,
                max: self.config.max_buy_in,
            });
        }
        self.seats[seat] = Some(Player::new(addr.to_string(), seat, buy_in));
        Ok(())
    }

    /// Leave the table. Between hands the seat is vacated immediately. A
    /// player dealt into the running hand is folded out of it and the seat
    /// is vacated when the hand ends, so their chips stay in the pots they
    /// funded.
    pub fn remove_player(&mut self, addr: &str) -> Result<(), GameError> {
        let seat = self
            .seat_of(addr)
            .ok_or_else(|| GameError::UnknownPlayer(addr.to_string()))?;
        if !self.dealt_into_running_hand(seat) {
            self.seats[seat] = None;
            return Ok(());
        }
        self.to_remove.push(seat);
        if self.player(seat).is_some_and(Player::in_hand) {
            self.fold_out(seat)
        } else {
            Ok(())
        }
    }

    /// Sit out upcoming hands. A player still in the current hand is folded
    /// out of it first.
    pub fn sit_out(&mut self, addr: &str) -> Result<(), GameError> {
        let seat = self
            .seat_of(addr)
            .ok_or_else(|| GameError::UnknownPlayer(addr.to_string()))?;
        if !self.dealt_into_running_hand(seat) {
            if let Some(player) = self.seats[seat].as_mut() {
                if player.status != PlayerStatus::Busted {
                    player.status = PlayerStatus::SittingOut;
                }
            }
            return Ok(());
        }
        self.to_sit_out.push(seat);
        if self.player(seat).is_some_and(Player::in_hand) {
            self.fold_out(seat)
        } else {
            Ok(())
        }
    }

    /// Return from sitting out; takes effect at the next hand.
    pub fn sit_in(&mut self, addr: &str) -> Result<(), GameError> {
        let seat = self
            .seat_of(addr)
            .ok_or_else(|| GameError::UnknownPlayer(addr.to_string()))?;
        if let Some(player) = self.seats[seat].as_mut() {
            if player.status == PlayerStatus::SittingOut {
                player.status = PlayerStatus::NotActed;
            }
        }
        Ok(())
    }

    /// Add chips between hands, up to the maximum buy-in. Brings a busted
    /// player back for the next hand.
    pub fn top_up(&mut self, addr: &str, amount: Chips) -> Result<(), GameError> {
        if self.round.is_betting() {
            return Err(GameError::HandInProgress);
        }
        let seat = self
            .seat_of(addr)
            .ok_or_else(|| GameError::UnknownPlayer(addr.to_string()))?;
        let min_buy_in = self.config.min_buy_in;
        let max_buy_in = self.config.max_buy_in;
        let player = self.player_mut(seat)?;
        let new_total = player.chips + amount;
        if new_total > max_buy_in {
            return Err(GameError::BuyInOutOfRange {
                amount: new_total,
                min: min_buy_in,
                max: max_buy_in,
            });
        }
        player.chips = new_total;
        if player.status == PlayerStatus::Busted && player.chips > 0 {
            player.status = PlayerStatus::NotActed;
        }
        Ok(())
    }

    // ----- hand lifecycle -----

    /// Start a new hand: rotate the button, post blinds, deal hole cards
    /// and open preflop action.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.round.is_betting() {
            return Err(GameError::HandInProgress);
        }

        let eligible = self.eligible_seats();
        if eligible.len() < self.config.min_players {
            return Err(GameError::NotEnoughPlayers);
        }

        self.hand_number += 1;
        self.board.clear();
        self.pots.clear();
        self.winners.clear();
        self.hand_history = HandHistory::default();
        self.action_index = 0;
        self.street_bet = 0;
        self.min_raise = self.config.big_blind;
        self.next_to_act = None;
        self.last_acted_seat = None;
        self.deck = Deck::standard();
        self.deck.shuffle(self.rng.as_mut());

        for player in self.seats.iter_mut().flatten() {
            player.hole_cards.clear();
            player.bet = 0;
            player.total_bet = 0;
            player.acted = false;
            player.last_action = None;
            if !matches!(
                player.status,
                PlayerStatus::Busted | PlayerStatus::SittingOut
            ) {
                player.status = PlayerStatus::Active;
            }
        }

        let btn = match self.btn {
            // First hand: lowest eligible seat takes the button.
            None => eligible[0],
            Some(prev) => self.next_seat_in(prev, &eligible)?,
        };
        self.btn = Some(btn);

        // Heads-up the dealer posts the small blind.
        let (sb, bb) = if eligible.len() == 2 {
            (btn, self.next_seat_in(btn, &eligible)?)
        } else {
            let sb = self.next_seat_in(btn, &eligible)?;
            (sb, self.next_seat_in(sb, &eligible)?)
        };
        self.sb_seat = Some(sb);
        self.bb_seat = Some(bb);

        self.round = Round::Preflop;
        self.status = GameStatus::InProgress;

        self.post_blind(sb, self.config.small_blind, BlindType::Sb)?;
        self.post_blind(bb, self.config.big_blind, BlindType::Bb)?;

        // Two passes, one card at a time, starting left of the dealer.
        for _ in 0..2 {
            let mut seat = btn;
            for _ in 0..eligible.len() {
                seat = self.next_seat_in(seat, &eligible)?;
                let card = self.deck.deal(1)?;
                self.player_mut(seat)?.hole_cards.extend(card);
            }
        }

        self.street_bet = self
            .seats
            .iter()
            .flatten()
            .map(|p| p.bet)
            .max()
            .unwrap_or(0);
        self.last_acted_seat = Some(bb);
        info!(
            "hand {} started with {} players, button at seat {}",
            self.hand_number,
            eligible.len(),
            btn
        );

        match self.find_next_to_act(bb) {
            Some(seat) => {
                self.next_to_act = Some(seat);
                Ok(())
            }
            // Both blinds all in already: run the board out.
            None => self.advance_round(),
        }
    }

    /// Apply one player action. Any precondition failure leaves the table
    /// untouched.
    pub fn perform_action(
        &mut self,
        addr: &str,
        kind: ActionKind,
        amount: Chips,
    ) -> Result<(), GameError> {
        if !self.round.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        let seat = self
            .seat_of(addr)
            .ok_or_else(|| GameError::UnknownPlayer(addr.to_string()))?;
        if self.next_to_act != Some(seat) {
            return Err(GameError::NotYourTurn(addr.to_string()));
        }

        let legal = rules::legal_actions(self, seat);
        let Some(entry) = legal.iter().find(|a| a.kind == kind) else {
            return Err(GameError::IllegalAction { kind });
        };
        // Only Bet and Raise carry a caller-chosen amount.
        if matches!(kind, ActionKind::Bet | ActionKind::Raise) {
            if amount > entry.max {
                return Err(GameError::InsufficientChips {
                    kind,
                    amount,
                    available: entry.max,
                });
            }
            if amount < entry.min {
                return Err(GameError::AmountBelowMinimum {
                    kind,
                    amount,
                    min: entry.min,
                });
            }
        }

        let timestamp = self.clock.now_ms();
        let round = self.round;
        let index = self.action_index;
        let street_bet = self.street_bet;
        let min_raise = self.min_raise;

        let (recorded_amount, new_street_bet, new_min_raise, reopen, actor_addr) = {
            let player = self.player_mut(seat)?;
            match kind {
                ActionKind::Fold => {
                    player.status = PlayerStatus::Folded;
                    (0, street_bet, min_raise, false, player.addr.clone())
                }
                ActionKind::Check => (0, street_bet, min_raise, false, player.addr.clone()),
                ActionKind::Call => {
                    let owed = street_bet - player.bet;
                    let (allin, real) = player.take_bet(owed);
                    if allin {
                        player.status = PlayerStatus::AllIn;
                    }
                    (real, street_bet, min_raise, false, player.addr.clone())
                }
                ActionKind::Bet => {
                    let (allin, real) = player.take_bet(amount);
                    if allin {
                        player.status = PlayerStatus::AllIn;
                    }
                    // A bet opens the street: it sets both the bet to match
                    // and the raise increment, and everyone else is back to
                    // still-to-act.
                    (real, player.bet, player.bet, true, player.addr.clone())
                }
                ActionKind::Raise => {
                    // `amount` is the total this round is being raised to.
                    let add = amount - player.bet;
                    let (allin, _real) = player.take_bet(add);
                    if allin {
                        player.status = PlayerStatus::AllIn;
                    }
                    let total = player.bet;
                    (
                        amount,
                        total,
                        total - street_bet,
                        true,
                        player.addr.clone(),
                    )
                }
                ActionKind::AllIn => {
                    let stack = player.chips;
                    let (_, real) = player.take_bet(stack);
                    player.status = PlayerStatus::AllIn;
                    let total = player.bet;
                    if total > street_bet {
                        // A full raise reopens the action; a sub-minimum
                        // all-in raises the amount to match but entitles
                        // only players who have not yet acted.
                        let full = total >= street_bet + min_raise;
                        (
                            real,
                            total,
                            if full { total - street_bet } else { min_raise },
                            full,
                            player.addr.clone(),
                        )
                    } else {
                        (real, street_bet, min_raise, false, player.addr.clone())
                    }
                }
                ActionKind::PostSmallBlind
                | ActionKind::PostBigBlind
                | ActionKind::Show
                | ActionKind::Muck => {
                    return Err(GameError::IllegalAction { kind });
                }
            }
        };

        let record = ActionRecord {
            seat,
            addr: actor_addr,
            kind,
            amount: recorded_amount,
            round,
            index,
            timestamp_ms: timestamp,
        };
        self.hand_history.add_action(record.clone());
        {
            let player = self.player_mut(seat)?;
            player.acted = true;
            player.last_action = Some(record);
        }

        self.street_bet = new_street_bet;
        self.min_raise = new_min_raise;
        if reopen {
            for other in self.seats.iter_mut().flatten() {
                if other.seat != seat && other.can_act() {
                    other.acted = false;
                }
            }
        }
        self.last_acted_seat = Some(seat);
        self.action_index += 1;
        debug!(
            "seat {seat} {kind} for {recorded_amount}, bet to match now {new_street_bet}"
        );

        self.continue_hand()
    }

    // ----- internals -----

    fn seat_of(&self, addr: &str) -> Option<usize> {
        self.player_by_addr(addr).map(|p| p.seat)
    }

    /// Whether the seat holds cards in a hand that is still running.
    fn dealt_into_running_hand(&self, seat: usize) -> bool {
        self.round.is_betting()
            && self
                .player(seat)
                .is_some_and(|p| !p.hole_cards.is_empty())
    }

    fn player_mut(&mut self, seat: usize) -> Result<&mut Player, GameError> {
        self.seats
            .get_mut(seat)
            .and_then(Option::as_mut)
            .ok_or(GameError::Internal("expected player missing from seat"))
    }

    fn player_ref(&self, seat: usize) -> Result<&Player, GameError> {
        self.player(seat)
            .ok_or(GameError::Internal("expected player missing from seat"))
    }

    /// Seats that can be dealt into the next hand.
    fn eligible_seats(&self) -> Vec<usize> {
        self.seats
            .iter()
            .flatten()
            .filter(|p| {
                !matches!(
                    p.status,
                    PlayerStatus::Busted | PlayerStatus::SittingOut
                ) && p.chips >= self.config.big_blind
            })
            .map(|p| p.seat)
            .collect()
    }

    /// Next member of `seats` clockwise of `from`.
    fn next_seat_in(&self, from: usize, seats: &[usize]) -> Result<usize, GameError> {
        let n = self.config.max_players;
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|s| seats.contains(s))
            .ok_or(GameError::Internal("no next seat among eligible players"))
    }

    fn find_next_to_act(&self, from: usize) -> Option<usize> {
        let n = self.config.max_players;
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|&s| self.player(s).is_some_and(Player::owes_action))
    }

    fn count_in_hand(&self) -> usize {
        self.seats.iter().flatten().filter(|p| p.in_hand()).count()
    }

    fn count_can_act(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|p| p.in_hand() && p.can_act())
            .count()
    }

    fn post_blind(
        &mut self,
        seat: usize,
        blind: Chips,
        blind_type: BlindType,
    ) -> Result<(), GameError> {
        let timestamp = self.clock.now_ms();
        let round = self.round;
        let index = self.action_index;
        let kind = match blind_type {
            BlindType::Sb => ActionKind::PostSmallBlind,
            BlindType::Bb => ActionKind::PostBigBlind,
        };

        let player = self.player_mut(seat)?;
        let (allin, real) = player.take_bet(blind);
        if allin {
            player.status = PlayerStatus::AllIn;
        }
        let record = ActionRecord {
            seat,
            addr: player.addr.clone(),
            kind,
            amount: real,
            round,
            index,
            timestamp_ms: timestamp,
        };
        player.last_action = Some(record.clone());
        let addr = player.addr.clone();

        self.hand_history.add_blind(BlindPost {
            seat,
            addr,
            blind_type,
            amount: real,
        });
        self.hand_history.add_action(record);
        self.action_index += 1;
        Ok(())
    }

    /// Fold a player out of the running hand without a caller action
    /// (leave or sit-out), then keep the hand moving.
    fn fold_out(&mut self, seat: usize) -> Result<(), GameError> {
        {
            let player = self.player_mut(seat)?;
            if player.status == PlayerStatus::Active {
                player.status = PlayerStatus::Folded;
            } else {
                // An all-in player has no live decision left; their stake
                // stays in contention until the hand resolves.
                return Ok(());
            }
        }
        if self.count_in_hand() == 1 {
            return self.resolve_last_player_standing();
        }
        if self.next_to_act == Some(seat) {
            match self.find_next_to_act(seat) {
                Some(next) => {
                    self.next_to_act = Some(next);
                    Ok(())
                }
                None => self.advance_round(),
            }
        } else {
            Ok(())
        }
    }

    /// After an accepted action: hand over to the next actor, close the
    /// round, or end the hand if only one player is left.
    fn continue_hand(&mut self) -> Result<(), GameError> {
        if self.count_in_hand() == 1 {
            return self.resolve_last_player_standing();
        }
        let from = self
            .last_acted_seat
            .ok_or(GameError::Internal("no last actor in a running hand"))?;
        match self.find_next_to_act(from) {
            Some(seat) => {
                self.next_to_act = Some(seat);
                Ok(())
            }
            None => self.advance_round(),
        }
    }

    /// Zero the per-round bets and rebuild the pot layering from per-hand
    /// contribution totals.
    fn collect_bets(&mut self) {
        for player in self.seats.iter_mut().flatten() {
            player.bet = 0;
            player.acted = false;
        }
        let contributions: Vec<(usize, Chips)> = self
            .seats
            .iter()
            .flatten()
            .map(|p| (p.seat, p.total_bet))
            .collect();
        let in_hand: BTreeSet<usize> = self
            .seats
            .iter()
            .flatten()
            .filter(|p| p.in_hand())
            .map(|p| p.seat)
            .collect();
        self.pots = pots::build_pots(&contributions, &in_hand);
        debug!("pots after collecting bets: {:?}", self.pots);
    }

    /// Close the current round and open the next one, dealing its cards
    /// inside the transition. When nobody can bet any more the board runs
    /// out street by street until showdown.
    fn advance_round(&mut self) -> Result<(), GameError> {
        loop {
            self.collect_bets();
            self.next_to_act = None;
            self.street_bet = 0;
            self.min_raise = self.config.big_blind;
            let next = self.round.next();
            self.round = next;
            debug!("street changes to {next:?}");
            match next {
                Round::Flop => {
                    self.deck.burn()?;
                    let cards = self.deck.deal(3)?;
                    self.board.extend(cards);
                }
                Round::Turn | Round::River => {
                    self.deck.burn()?;
                    let cards = self.deck.deal(1)?;
                    self.board.extend(cards);
                }
                Round::Showdown => return self.resolve_showdown(),
                _ => return Err(GameError::Internal("round advanced outside a hand")),
            }
            self.hand_history.set_board(self.board.clone());

            let btn = self
                .btn
                .ok_or(GameError::Internal("no dealer in a running hand"))?;
            self.last_acted_seat = Some(btn);
            if self.count_can_act() >= 2 {
                if let Some(seat) = self.find_next_to_act(btn) {
                    self.next_to_act = Some(seat);
                    return Ok(());
                }
            }
            // Everyone left is all in: the round opens and closes empty.
        }
    }

    /// Everyone else folded; the last player standing takes all pots
    /// without a showdown.
    fn resolve_last_player_standing(&mut self) -> Result<(), GameError> {
        self.next_to_act = None;
        self.collect_bets();
        let winner = self
            .seats
            .iter()
            .flatten()
            .find(|p| p.in_hand())
            .map(|p| p.seat)
            .ok_or(GameError::Internal("no player left standing"))?;
        for pot in self.pots.iter_mut() {
            pot.winners = vec![winner];
        }
        info!("seat {winner} wins uncontested");
        self.pay_out(None)?;
        self.finish_hand();
        Ok(())
    }

    fn resolve_showdown(&mut self) -> Result<(), GameError> {
        self.next_to_act = None;
        let board = self.board.clone();

        let contender_seats: Vec<usize> = self
            .seats
            .iter()
            .flatten()
            .filter(|p| p.in_hand())
            .map(|p| p.seat)
            .collect();

        let mut hands: BTreeMap<usize, PlayerHand> = BTreeMap::new();
        for &seat in &contender_seats {
            let player = self.player_ref(seat)?;
            let hand = evaluator::evaluate_hand(&player.hole_cards, &board)?;
            hands.insert(seat, hand);
        }

        // Table every contender's hand.
        let timestamp = self.clock.now_ms();
        for &seat in &contender_seats {
            let hand = hands
                .get(&seat)
                .ok_or(GameError::Internal("missing showdown hand"))?
                .clone();
            let index = self.action_index;
            let player = self.player_mut(seat)?;
            player.status = PlayerStatus::Showing;
            let record = ActionRecord {
                seat,
                addr: player.addr.clone(),
                kind: ActionKind::Show,
                amount: 0,
                round: Round::Showdown,
                index,
                timestamp_ms: timestamp,
            };
            player.last_action = Some(record.clone());
            let showdown = Showdown {
                hole_cards: player.hole_cards.clone(),
                category: hand.category,
                picks: hand.picks.clone(),
            };
            self.hand_history.add_action(record);
            self.hand_history.add_showdown(seat, showdown);
            self.action_index += 1;
        }

        // Per pot, the eligible contenders tying for the best hand win it.
        for pot in self.pots.iter_mut() {
            let mut best: Option<(Category, u32)> = None;
            let mut winners: Vec<usize> = Vec::new();
            for &seat in &pot.eligible {
                let Some(hand) = hands.get(&seat) else {
                    continue;
                };
                match best {
                    None => {
                        best = Some(hand.value());
                        winners.push(seat);
                    }
                    Some(b) => match hand.value().cmp(&b) {
                        std::cmp::Ordering::Greater => {
                            best = Some(hand.value());
                            winners.clear();
                            winners.push(seat);
                        }
                        std::cmp::Ordering::Equal => winners.push(seat),
                        std::cmp::Ordering::Less => {}
                    },
                }
            }
            pot.winners = winners;
        }
        info!("showdown between seats {contender_seats:?}");

        self.pay_out(Some(&hands))?;
        self.finish_hand();
        Ok(())
    }

    /// Split every pot among its winners and move the chips. The odd chip
    /// goes to the eligible winner closest to the left of the dealer.
    fn pay_out(
        &mut self,
        hands: Option<&BTreeMap<usize, PlayerHand>>,
    ) -> Result<(), GameError> {
        let btn = self
            .btn
            .ok_or(GameError::Internal("no dealer in a running hand"))?;
        let n = self.config.max_players;
        let start = (btn + 1) % n;

        let mut awards: Vec<HandWinner> = Vec::new();
        for (pot_index, pot) in self.pots.iter().enumerate() {
            if pot.winners.is_empty() {
                continue;
            }
            let (share, remainder) = pots::split(pot.amount, pot.winners.len());
            let mut ordered = pot.winners.clone();
            ordered.sort_by_key(|&seat| (seat + n - start) % n);
            for (i, &seat) in ordered.iter().enumerate() {
                let amount = share + if i == 0 { remainder } else { 0 };
                let addr = self.player_ref(seat)?.addr.clone();
                let (category, best_five) = match hands.and_then(|m| m.get(&seat)) {
                    Some(hand) => (Some(hand.category), hand.picks.clone()),
                    None => (None, Vec::new()),
                };
                awards.push(HandWinner {
                    seat,
                    addr,
                    amount,
                    pot_index,
                    category,
                    best_five,
                });
            }
        }

        let mut prize_by_seat: BTreeMap<usize, Chips> = BTreeMap::new();
        for award in &awards {
            *prize_by_seat.entry(award.seat).or_insert(0) += award.amount;
        }
        for (&seat, &prize) in &prize_by_seat {
            let player = self.player_mut(seat)?;
            player.chips += prize;
            info!("seat {seat} is paid {prize}");
        }

        let results: BTreeMap<usize, (Chips, Chips)> = self
            .seats
            .iter()
            .flatten()
            .map(|p| {
                let prize = prize_by_seat.get(&p.seat).copied().unwrap_or(0);
                (p.seat, (prize, p.total_bet))
            })
            .collect();
        self.hand_history.set_chips_change(&results);
        self.winners = awards;
        Ok(())
    }

    /// Close out the hand: mark busts, apply queued sit-outs and leaves,
    /// and decide whether the table can continue.
    fn finish_hand(&mut self) {
        self.round = Round::End;
        self.next_to_act = None;
        self.street_bet = 0;
        self.min_raise = self.config.big_blind;

        for player in self.seats.iter_mut().flatten() {
            if player.chips == 0 {
                player.status = PlayerStatus::Busted;
            }
        }

        let to_sit_out = std::mem::take(&mut self.to_sit_out);
        for seat in to_sit_out {
            if let Some(player) = self.seats[seat].as_mut() {
                if player.status != PlayerStatus::Busted {
                    player.status = PlayerStatus::SittingOut;
                }
            }
        }
        let to_remove = std::mem::take(&mut self.to_remove);
        for seat in to_remove {
            self.seats[seat] = None;
        }

        if self.eligible_seats().len() < self.config.min_players {
            self.status = GameStatus::Finished;
            info!("table {} finished after hand {}", self.addr, self.hand_number);
        }
    }
}

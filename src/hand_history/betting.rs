//! The betting state machine.
//!
//! Walks the body of a hand block line by line and keeps the running pot,
//! what every player has put in on the current street and over the whole
//! hand, and whether the current street has an all-in bet to call. Every
//! monetary line becomes a [`RawAction`] with its sequence number and the
//! pot as it was right before the action.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{floor_zero, ActionKind, Street};

use super::lines::{classify, BodyLine, Marker};
use super::model::ParseWarning;

/// What a player put forward, with the payload each kind needs.
///
/// A raise carries both the total it raised to and what it actually added
/// to the pot, so the two can never be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wager {
    PostAnte { amount: Decimal },
    PostBlind { amount: Decimal },
    Fold,
    Check,
    Call { amount: Decimal },
    Bet { amount: Decimal },
    Raise { to: Decimal, increment: Decimal },
}

impl Wager {
    pub fn kind(&self) -> ActionKind {
        match self {
            Wager::PostAnte { .. } => ActionKind::PostAnte,
            Wager::PostBlind { .. } => ActionKind::PostBlind,
            Wager::Fold => ActionKind::Fold,
            Wager::Check => ActionKind::Check,
            Wager::Call { .. } => ActionKind::Call,
            Wager::Bet { .. } => ActionKind::Bet,
            Wager::Raise { .. } => ActionKind::Raise,
        }
    }

    /// Chips this wager moved from the player into the pot.
    pub fn contribution(&self) -> Decimal {
        match self {
            Wager::PostAnte { amount }
            | Wager::PostBlind { amount }
            | Wager::Call { amount }
            | Wager::Bet { amount } => *amount,
            Wager::Raise { increment, .. } => *increment,
            Wager::Fold | Wager::Check => Decimal::ZERO,
        }
    }

    /// The amount as the hand history reports it: the total for a raise,
    /// the size for everything else.
    pub fn logged_amount(&self) -> Decimal {
        match self {
            Wager::Raise { to, .. } => *to,
            other => other.contribution(),
        }
    }
}

/// One action before any derived metrics are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAction {
    pub sequence: u32,
    pub player: String,
    pub street: Street,
    pub wager: Wager,
    pub amount_to_call: Decimal,
    pub pot_before: Decimal,
    pub is_all_in: bool,
}

/// Running state of the betting on one hand.
#[derive(Debug, Clone, Default)]
pub struct BettingState {
    street: Street,
    pot: Decimal,
    /// Highest total anyone has put in on this street.
    facing: Decimal,
    facing_all_in: bool,
    street_committed: HashMap<String, Decimal>,
    hand_committed: BTreeMap<String, Decimal>,
    natural_blinds: Vec<String>,
    ante: Option<Decimal>,
    uncalled_returned: Decimal,
    actions: Vec<RawAction>,
}

impl BettingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn pot(&self) -> Decimal {
        self.pot
    }

    pub fn facing_all_in(&self) -> bool {
        self.facing_all_in
    }

    pub fn street_committed(&self, player: &str) -> Decimal {
        self.street_committed
            .get(player)
            .copied()
            .unwrap_or_default()
    }

    pub fn hand_committed(&self, player: &str) -> Decimal {
        self.hand_committed.get(player).copied().unwrap_or_default()
    }

    pub fn actions(&self) -> &[RawAction] {
        &self.actions
    }

    /// Move to `street`. Per street bookkeeping only resets when the street
    /// really changes.
    pub fn enter_street(&mut self, street: Street) {
        if street == self.street {
            return;
        }
        self.street = street;
        self.facing = Decimal::ZERO;
        self.facing_all_in = false;
        self.street_committed.clear();
    }

    /// An uncalled bet went back to `player`. This corrects the totals and
    /// isn't an action of its own.
    pub fn refund(&mut self, player: &str, amount: Decimal) {
        self.pot -= amount;
        self.uncalled_returned += amount;
        *self
            .hand_committed
            .entry(player.to_string())
            .or_default() -= amount;
    }

    pub fn post_ante(&mut self, player: &str, amount: Decimal) {
        if self.ante.is_none() {
            self.ante = Some(amount);
        }
        self.commit_to_hand(player, amount);
        self.record(player, Street::Preflop, Wager::PostAnte { amount }, Decimal::ZERO, false);
    }

    pub fn post_blind(&mut self, player: &str, amount: Decimal) {
        if self.natural_blinds.len() < 2 && !self.natural_blinds.iter().any(|p| p == player) {
            self.natural_blinds.push(player.to_string());
        }
        self.commit_to_hand(player, amount);
        self.commit_to_street(player, amount);
        if amount > self.facing {
            self.facing = amount;
        }
        self.record(player, Street::Preflop, Wager::PostBlind { amount }, Decimal::ZERO, false);
    }

    pub fn fold(&mut self, player: &str) {
        self.record(player, self.street, Wager::Fold, Decimal::ZERO, false);
    }

    pub fn check(&mut self, player: &str) {
        self.record(player, self.street, Wager::Check, Decimal::ZERO, false);
    }

    pub fn call(&mut self, player: &str, amount: Decimal, all_in: bool) {
        let to_call = self.to_call(player);
        let all_in = all_in || self.facing_all_in;
        self.commit_to_hand(player, amount);
        self.commit_to_street(player, amount);
        self.record(player, self.street, Wager::Call { amount }, to_call, all_in);
    }

    pub fn bet(&mut self, player: &str, amount: Decimal, all_in: bool) {
        self.facing = amount;
        self.facing_all_in |= all_in;
        self.commit_to_hand(player, amount);
        self.commit_to_street(player, amount);
        self.record(player, self.street, Wager::Bet { amount }, Decimal::ZERO, all_in);
    }

    /// `to` is the total the player raised to on this street. Only the part
    /// above what they already had in goes into the pot, and never less
    /// than nothing.
    pub fn raise(&mut self, player: &str, to: Decimal, all_in: bool) {
        let to_call = self.to_call(player);
        let increment = floor_zero(to - self.street_committed(player));
        self.facing = to;
        self.facing_all_in |= all_in;
        self.commit_to_hand(player, increment);
        self.street_committed.insert(player.to_string(), to);
        self.record(
            player,
            self.street,
            Wager::Raise { to, increment },
            to_call,
            all_in,
        );
    }

    fn to_call(&self, player: &str) -> Decimal {
        floor_zero(self.facing - self.street_committed(player))
    }

    fn commit_to_hand(&mut self, player: &str, amount: Decimal) {
        *self
            .hand_committed
            .entry(player.to_string())
            .or_default() += amount;
    }

    fn commit_to_street(&mut self, player: &str, amount: Decimal) {
        *self
            .street_committed
            .entry(player.to_string())
            .or_default() += amount;
    }

    /// Append the action and grow the pot by what it contributed.
    fn record(
        &mut self,
        player: &str,
        street: Street,
        wager: Wager,
        amount_to_call: Decimal,
        is_all_in: bool,
    ) {
        let pot_before = self.pot;
        self.pot += wager.contribution();
        let sequence = self.actions.len() as u32 + 1;
        self.actions.push(RawAction {
            sequence,
            player: player.to_string(),
            street,
            wager,
            amount_to_call,
            pot_before,
            is_all_in,
        });
    }
}

/// Everything the body of a hand said about the betting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BettingOutcome {
    pub actions: Vec<RawAction>,
    pub hand_committed: BTreeMap<String, Decimal>,
    pub uncalled_returned: Decimal,
    /// The first ante posted, if there were antes.
    pub ante: Option<Decimal>,
    /// The first two distinct blind posters, small blind first.
    pub natural_blinds: Vec<String>,
    pub dealt_cards: BTreeMap<String, String>,
    pub showdown_players: BTreeSet<String>,
    pub showdown_cards: BTreeMap<String, String>,
    pub warnings: Vec<ParseWarning>,
}

impl BettingOutcome {
    /// The first player to post a blind.
    pub fn natural_small_blind(&self) -> Option<&str> {
        self.natural_blinds.first().map(String::as_str)
    }
}

/// Run the state machine over the body of a hand.
///
/// `lines` are the non-blank lines of the block after the hand and table
/// lines, and `first_line_number` is the index of the first of them inside
/// the block. Processing stops at the summary marker. Lines that match
/// nothing are kept as warnings.
pub fn walk_body(lines: &[&str], first_line_number: usize) -> BettingOutcome {
    let mut state = BettingState::new();
    let mut outcome = BettingOutcome::default();

    for (offset, line) in lines.iter().enumerate() {
        let line = line.trim();
        match classify(line) {
            BodyLine::Marker(Marker::Summary) => break,
            BodyLine::Marker(Marker::Street(street)) => state.enter_street(street),
            BodyLine::Noise | BodyLine::Seat | BodyLine::Collected { .. } => {}
            BodyLine::Dealt { player, cards } => {
                outcome
                    .dealt_cards
                    .insert(player.to_string(), cards.to_string());
            }
            BodyLine::Uncalled { player, amount } => state.refund(player, amount),
            BodyLine::Shows { player, cards } => {
                outcome.showdown_players.insert(player.to_string());
                outcome
                    .showdown_cards
                    .insert(player.to_string(), cards.to_string());
            }
            BodyLine::Mucks { player } => {
                outcome.showdown_players.insert(player.to_string());
            }
            BodyLine::PostAnte { player, amount } => state.post_ante(player, amount),
            BodyLine::PostBlind { player, amount } => state.post_blind(player, amount),
            BodyLine::Fold { player } => state.fold(player),
            BodyLine::Check { player } => state.check(player),
            BodyLine::Call {
                player,
                amount,
                all_in,
            } => state.call(player, amount, all_in),
            BodyLine::Bet {
                player,
                amount,
                all_in,
            } => state.bet(player, amount, all_in),
            BodyLine::Raise { player, to, all_in } => state.raise(player, to, all_in),
            BodyLine::Unrecognized => {
                let line_number = first_line_number + offset;
                debug!(line_number, line, "Skipping unrecognized hand history line");
                outcome.warnings.push(ParseWarning {
                    line_number,
                    line: line.to_string(),
                });
            }
        }
    }

    outcome.actions = state.actions;
    outcome.hand_committed = state.hand_committed;
    outcome.uncalled_returned = state.uncalled_returned;
    outcome.ante = state.ante;
    outcome.natural_blinds = state.natural_blinds;
    outcome
}

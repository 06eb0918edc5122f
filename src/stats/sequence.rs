use crate::core::{ActionKind, Street};
use crate::hand_history::ParsedHand;

/// One action as the store hands it back: just enough to replay the order
/// of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ActionRow {
    pub sequence: u32,
    pub is_hero: bool,
    pub street: Street,
    pub kind: ActionKind,
}

/// The ordered actions of one hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct HandActions {
    pub hand_id: String,
    /// The hand had flop cards dealt.
    pub saw_flop: bool,
    pub rows: Vec<ActionRow>,
}

impl HandActions {
    /// Build from rows in any order. The rows are sorted by sequence.
    pub fn new(hand_id: impl Into<String>, saw_flop: bool, mut rows: Vec<ActionRow>) -> Self {
        rows.sort_by_key(|r| r.sequence);
        Self {
            hand_id: hand_id.into(),
            saw_flop,
            rows,
        }
    }

    fn ordered(&self) -> Vec<&ActionRow> {
        let mut rows: Vec<&ActionRow> = self.rows.iter().collect();
        rows.sort_by_key(|r| r.sequence);
        rows
    }

    /// Whether hero had a 3-bet opportunity, and if so whether they took it.
    ///
    /// The opportunity is anchored at hero's first voluntary preflop action:
    /// exactly one other player must have raised before it. No raise means
    /// hero was opening and two or more means it's a 4-bet spot. Hero made
    /// the 3-bet if they raised anywhere preflop.
    pub fn three_bet_spot(&self) -> Option<bool> {
        let preflop: Vec<&ActionRow> = self
            .ordered()
            .into_iter()
            .filter(|r| r.street == Street::Preflop)
            .collect();
        let anchor = preflop
            .iter()
            .find(|r| r.is_hero && !r.kind.is_forced())?
            .sequence;
        let prior_raises = preflop
            .iter()
            .filter(|r| !r.is_hero && r.kind == ActionKind::Raise && r.sequence < anchor)
            .count();
        if prior_raises != 1 {
            return None;
        }
        Some(
            preflop
                .iter()
                .any(|r| r.is_hero && r.kind == ActionKind::Raise),
        )
    }

    /// Whether hero had a continuation bet opportunity, and if so whether
    /// they took it.
    ///
    /// Hero needs to be the last preflop raiser in a hand that reached the
    /// flop with at least one flop action. The c-bet is made when the first
    /// bet on the flop is hero's.
    pub fn cbet_spot(&self) -> Option<bool> {
        let rows = self.ordered();
        let last_raise = rows
            .iter()
            .rev()
            .find(|r| r.street == Street::Preflop && r.kind == ActionKind::Raise)?;
        if !last_raise.is_hero || !self.saw_flop {
            return None;
        }

        let mut flop = rows.iter().filter(|r| r.street == Street::Flop).peekable();
        flop.peek()?;
        Some(
            flop.find(|r| r.kind == ActionKind::Bet)
                .is_some_and(|bet| bet.is_hero),
        )
    }
}

impl From<&ParsedHand> for HandActions {
    fn from(hand: &ParsedHand) -> Self {
        let rows = hand
            .actions
            .iter()
            .map(|a| ActionRow {
                sequence: a.sequence,
                is_hero: a.is_hero,
                street: a.street,
                kind: a.kind,
            })
            .collect();
        HandActions::new(hand.hand.hand_id.clone(), hand.saw_flop(), rows)
    }
}

/// Counts behind the sequence dependent statistics.
///
/// Keeping opportunities and occurrences rather than ratios lets counts
/// from different files or stores be merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceCounts {
    pub hands: usize,
    pub three_bet_opportunities: usize,
    pub three_bets: usize,
    pub cbet_opportunities: usize,
    pub cbets: usize,
    /// Hero's post flop bets and raises.
    pub postflop_aggressive: usize,
    /// Hero's post flop calls.
    pub postflop_calls: usize,
}

impl SequenceCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hands<'a>(hands: impl IntoIterator<Item = &'a HandActions>) -> Self {
        let mut counts = Self::new();
        for hand in hands {
            counts.add_hand(hand);
        }
        counts
    }

    pub fn add_hand(&mut self, hand: &HandActions) {
        self.hands += 1;
        if let Some(made) = hand.three_bet_spot() {
            self.three_bet_opportunities += 1;
            self.three_bets += usize::from(made);
        }
        if let Some(made) = hand.cbet_spot() {
            self.cbet_opportunities += 1;
            self.cbets += usize::from(made);
        }
        let (aggressive, calls) = postflop_counts(hand.rows.iter().filter(|r| r.is_hero));
        self.postflop_aggressive += aggressive;
        self.postflop_calls += calls;
    }

    pub fn merge(&mut self, other: &SequenceCounts) {
        self.hands += other.hands;
        self.three_bet_opportunities += other.three_bet_opportunities;
        self.three_bets += other.three_bets;
        self.cbet_opportunities += other.cbet_opportunities;
        self.cbets += other.cbets;
        self.postflop_aggressive += other.postflop_aggressive;
        self.postflop_calls += other.postflop_calls;
    }

    /// Fraction of 3-bet opportunities taken. Zero without opportunities.
    pub fn three_bet_pct(&self) -> f64 {
        ratio(self.three_bets, self.three_bet_opportunities)
    }

    /// Fraction of c-bet opportunities taken. Zero without opportunities.
    pub fn cbet_pct(&self) -> f64 {
        ratio(self.cbets, self.cbet_opportunities)
    }

    /// Hero's post flop (bets + raises) / calls. Infinite without calls.
    pub fn aggression_factor(&self) -> f64 {
        if self.postflop_calls == 0 {
            f64::INFINITY
        } else {
            self.postflop_aggressive as f64 / self.postflop_calls as f64
        }
    }
}

fn ratio(made: usize, opportunities: usize) -> f64 {
    if opportunities == 0 {
        0.0
    } else {
        made as f64 / opportunities as f64
    }
}

fn postflop_counts<'a>(rows: impl IntoIterator<Item = &'a ActionRow>) -> (usize, usize) {
    rows.into_iter()
        .filter(|r| r.street.is_postflop())
        .fold((0, 0), |(aggressive, calls), r| match r.kind {
            ActionKind::Bet | ActionKind::Raise => (aggressive + 1, calls),
            ActionKind::Call => (aggressive, calls + 1),
            _ => (aggressive, calls),
        })
}

/// 3-bet% over a set of hands: 3-bets made / 3-bet opportunities.
pub fn three_bet_pct(hands: &[HandActions]) -> f64 {
    SequenceCounts::from_hands(hands).three_bet_pct()
}

/// C-bet% over a set of hands: c-bets made / c-bet opportunities.
pub fn cbet_pct(hands: &[HandActions]) -> f64 {
    SequenceCounts::from_hands(hands).cbet_pct()
}

/// (bets + raises) / calls over the flop, turn and river rows given.
///
/// Returns positive infinity when there are no calls, even with no
/// aggressive actions either.
pub fn aggression_factor<'a>(rows: impl IntoIterator<Item = &'a ActionRow>) -> f64 {
    let (aggressive, calls) = postflop_counts(rows);
    if calls == 0 {
        f64::INFINITY
    } else {
        aggressive as f64 / calls as f64
    }
}

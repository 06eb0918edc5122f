use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::hand_history::{ParsedHand, SessionMeta};

/// What one session file amounted to for the hero.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSummary {
    /// Taken from the first hand that parsed.
    pub meta: SessionMeta,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub hands: usize,
    /// Hands the hero was seated in.
    pub hero_hands: usize,
    /// First starting stack plus every re-buy.
    pub buy_in: Decimal,
    /// Hero's stack at the end of the last hand they played.
    pub cash_out: Decimal,
}

impl SessionSummary {
    /// Summarize hands in the order they appear in the file.
    pub fn from_hands<'a>(hands: impl IntoIterator<Item = &'a ParsedHand>) -> Option<Self> {
        let mut tracker: Option<SessionTracker> = None;
        for hand in hands {
            match tracker.as_mut() {
                Some(t) => t.observe(hand),
                None => tracker = Some(SessionTracker::start(hand)),
            }
        }
        tracker.map(SessionTracker::finish)
    }

    pub fn net(&self) -> Decimal {
        self.cash_out - self.buy_in
    }
}

/// Running state while walking a file's hands.
#[derive(Debug, Clone)]
pub(crate) struct SessionTracker {
    summary: SessionSummary,
    last_ending_stack: Option<Decimal>,
}

impl SessionTracker {
    pub(crate) fn start(first: &ParsedHand) -> Self {
        let mut tracker = Self {
            summary: SessionSummary {
                meta: first.session.clone(),
                started_at: first.hand.timestamp,
                ended_at: first.hand.timestamp,
                hands: 0,
                hero_hands: 0,
                buy_in: Decimal::ZERO,
                cash_out: Decimal::ZERO,
            },
            last_ending_stack: None,
        };
        tracker.observe(first);
        tracker
    }

    pub(crate) fn observe(&mut self, hand: &ParsedHand) {
        self.summary.hands += 1;
        self.summary.ended_at = self.summary.ended_at.max(hand.hand.timestamp);

        let Some(hero) = hand.hero() else {
            return;
        };
        self.summary.hero_hands += 1;

        match self.last_ending_stack {
            None => self.summary.buy_in = hero.starting_stack,
            Some(previous) if hero.starting_stack > previous => {
                self.summary.buy_in += hero.starting_stack - previous;
            }
            Some(_) => {}
        }

        let ending = hero.starting_stack + hero.net_result;
        self.last_ending_stack = Some(ending);
        self.summary.cash_out = ending;
    }

    pub(crate) fn finish(self) -> SessionSummary {
        self.summary
    }
}

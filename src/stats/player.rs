use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::core::Street;
use crate::hand_history::ParsedHand;

/// Fewest hands before a player gets an archetype.
pub const MIN_HANDS_FOR_CLASSIFICATION: usize = 15;
/// VPIP at or above this is loose.
pub const VPIP_LOOSE_THRESHOLD: f64 = 0.25;
/// PFR / VPIP at or above this is aggressive.
pub const AGGRESSION_RATIO_THRESHOLD: f64 = 0.5;

const STANDARD_HANDS_THRESHOLD: usize = 50;
const CONFIRMED_HANDS_THRESHOLD: usize = 100;

/// Per hand counts for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSummary {
    pub username: String,
    pub hands: usize,
    pub vpip_hands: usize,
    pub pfr_hands: usize,
    /// Hands where the player acted on the flop.
    pub flop_hands: usize,
    /// Flop hands that went on to showdown.
    pub showdown_hands: usize,
    pub total_profit: Decimal,
    /// Sum of every hand's net result in big blinds.
    pub big_blinds_won: Decimal,
}

impl PlayerSummary {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Summarize every hand the player was seated in.
    pub fn from_hands<'a>(
        username: impl Into<String>,
        hands: impl IntoIterator<Item = &'a ParsedHand>,
    ) -> Self {
        let mut summary = Self::new(username);
        for hand in hands {
            summary.add_hand(hand);
        }
        summary
    }

    /// Add one hand. Hands the player wasn't in are ignored.
    pub fn add_hand(&mut self, hand: &ParsedHand) {
        let Some(player) = hand.player(&self.username) else {
            return;
        };

        self.hands += 1;
        self.vpip_hands += usize::from(player.vpip);
        self.pfr_hands += usize::from(player.pfr);
        self.total_profit = self.total_profit.saturating_add(player.net_result);
        if let Some(big_blinds) = player.net_result.checked_div(hand.session.big_blind) {
            self.big_blinds_won = self.big_blinds_won.saturating_add(big_blinds);
        }

        let saw_flop = hand
            .actions_on(Street::Flop)
            .any(|a| a.player == player.username);
        if saw_flop {
            self.flop_hands += 1;
            self.showdown_hands += usize::from(player.went_to_showdown);
        }
    }

    pub fn merge(&mut self, other: &PlayerSummary) {
        self.hands += other.hands;
        self.vpip_hands += other.vpip_hands;
        self.pfr_hands += other.pfr_hands;
        self.flop_hands += other.flop_hands;
        self.showdown_hands += other.showdown_hands;
        self.total_profit = self.total_profit.saturating_add(other.total_profit);
        self.big_blinds_won = self.big_blinds_won.saturating_add(other.big_blinds_won);
    }

    /// Fraction of hands with a voluntary preflop call or raise.
    pub fn vpip_pct(&self) -> f64 {
        ratio(self.vpip_hands, self.hands)
    }

    /// Fraction of hands with a preflop raise.
    pub fn pfr_pct(&self) -> f64 {
        ratio(self.pfr_hands, self.hands)
    }

    /// Went to showdown, as a fraction of the hands where the player saw the
    /// flop.
    pub fn wtsd_pct(&self) -> f64 {
        ratio(self.showdown_hands, self.flop_hands)
    }

    /// Big blinds won per 100 hands.
    pub fn bb_per_100(&self) -> f64 {
        if self.hands == 0 {
            return 0.0;
        }
        self.big_blinds_won.to_f64().unwrap_or_default() / self.hands as f64 * 100.0
    }

    pub fn archetype(&self) -> Option<Archetype> {
        classify_player(self.vpip_pct(), self.pfr_pct(), self.hands)
    }

    pub fn confidence(&self) -> ConfidenceTier {
        confidence_tier(self.hands)
    }
}

fn ratio(made: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        made as f64 / total as f64
    }
}

/// Playing style from how often someone enters the pot and how often they
/// do it with a raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    /// Tight and aggressive.
    Tag,
    /// Loose and aggressive.
    Lag,
    /// Tight and passive.
    Nit,
    /// Loose and passive.
    Fish,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Archetype::Tag => "TAG",
            Archetype::Lag => "LAG",
            Archetype::Nit => "Nit",
            Archetype::Fish => "Fish",
        };
        write!(f, "{label}")
    }
}

/// How much a read can be trusted given the sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConfidenceTier {
    Preliminary,
    Standard,
    Confirmed,
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceTier::Preliminary => "preliminary",
            ConfidenceTier::Standard => "standard",
            ConfidenceTier::Confirmed => "confirmed",
        };
        write!(f, "{label}")
    }
}

/// Classify a player from VPIP and PFR fractions.
///
/// Returns `None` below [`MIN_HANDS_FOR_CLASSIFICATION`] hands. A player who
/// never entered the pot is a nit.
pub fn classify_player(vpip: f64, pfr: f64, hands: usize) -> Option<Archetype> {
    if hands < MIN_HANDS_FOR_CLASSIFICATION {
        return None;
    }
    let loose = vpip >= VPIP_LOOSE_THRESHOLD;
    let aggression = if vpip > 0.0 { pfr / vpip } else { 0.0 };
    let aggressive = aggression >= AGGRESSION_RATIO_THRESHOLD;

    Some(match (loose, aggressive) {
        (true, true) => Archetype::Lag,
        (true, false) => Archetype::Fish,
        (false, true) => Archetype::Tag,
        (false, false) => Archetype::Nit,
    })
}

pub fn confidence_tier(hands: usize) -> ConfidenceTier {
    if hands >= CONFIRMED_HANDS_THRESHOLD {
        ConfidenceTier::Confirmed
    } else if hands >= STANDARD_HANDS_THRESHOLD {
        ConfidenceTier::Standard
    } else {
        ConfidenceTier::Preliminary
    }
}

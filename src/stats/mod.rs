//! Statistics derived from parsed hands.
//!
//! The sequence statistics (3-bet%, c-bet%, aggression factor) replay the
//! ordered action rows of each hand, the way a store returns them. The
//! player statistics (VPIP, PFR, WTSD, win rate) only need the per player
//! flags of finalized hands.

/// 3-bet, c-bet and aggression factor from ordered action rows.
mod sequence;
/// Export the sequence statistics
pub use self::sequence::{
    aggression_factor, cbet_pct, three_bet_pct, ActionRow, HandActions, SequenceCounts,
};

/// Per player ratios and archetypes.
mod player;
/// Export the player statistics
pub use self::player::{
    classify_player, confidence_tier, Archetype, ConfidenceTier, PlayerSummary,
    AGGRESSION_RATIO_THRESHOLD, MIN_HANDS_FOR_CLASSIFICATION, VPIP_LOOSE_THRESHOLD,
};

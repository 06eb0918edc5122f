use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::core::{ActionKind, Position, Street};

/// Table and game context for a hand.
///
/// One of these is created per file from the first hand's header and is not
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionMeta {
    pub table_name: String,
    /// Always `NLHE` for the supported grammar.
    pub game_type: String,
    /// Always `NL` for the supported grammar.
    pub limit_type: String,
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    /// Zero until the first ante post is seen.
    pub ante: Decimal,
    pub max_seats: usize,
    pub is_tournament: bool,
    pub tournament_id: Option<String>,
    /// The level label, e.g. `Level IV`.
    pub tournament_level: Option<String>,
    /// The buy-in token from the tournament header, e.g. `13200+1800`.
    pub tournament_buy_in: Option<String>,
    /// `USD`, `EUR`, or `PLAY` for play money and tournament chips.
    pub currency: String,
}

/// Hand level data: identifiers, board, and how the pot ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRecord {
    /// The site's hand number. Used for duplicate detection.
    pub hand_id: String,
    pub timestamp: NaiveDateTime,
    pub button_seat: usize,
    /// Space separated, e.g. `Ah Kd 2c`.
    pub board_flop: Option<String>,
    pub board_turn: Option<String>,
    pub board_river: Option<String>,
    /// Pot as reported by the summary, after uncalled bets were returned.
    pub total_pot: Decimal,
    pub rake: Decimal,
    /// Sum of every uncalled bet returned during the hand.
    pub uncalled_bet_returned: Decimal,
}

/// One seated player in one hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerInHand {
    pub username: String,
    pub seat: usize,
    pub starting_stack: Decimal,
    pub position: Position,
    pub hole_cards: Option<String>,
    /// Amount collected minus amount committed over the whole hand.
    pub net_result: Decimal,
    pub vpip: bool,
    pub pfr: bool,
    pub went_to_showdown: bool,
    pub is_hero: bool,
    pub sitting_out: bool,
}

/// A single recorded action.
///
/// `amount` is the total size for a bet or raise, the increment for a call,
/// the posted amount for blinds and antes, and zero for folds and checks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    /// Starts at 1 for every hand.
    pub sequence: u32,
    pub player: String,
    pub is_hero: bool,
    pub street: Street,
    pub kind: ActionKind,
    pub amount: Decimal,
    /// How much more the player needed to put in to call when acting.
    pub amount_to_call: Decimal,
    /// Running pot immediately before this action.
    pub pot_before: Decimal,
    pub is_all_in: bool,
    /// Stack to pot ratio. Only on hero's first flop action.
    pub spr: Option<Decimal>,
    /// Minimum defense frequency. Only on hero actions facing a bet.
    pub mdf: Option<Decimal>,
}

/// A body line that matched nothing the parser knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseWarning {
    /// Zero based line index inside the hand block, blank lines excluded.
    pub line_number: usize,
    pub line: String,
}

/// Everything parsed out of a single hand block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedHand {
    pub session: SessionMeta,
    pub hand: HandRecord,
    pub players: Vec<PlayerInHand>,
    pub actions: Vec<Action>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub warnings: Vec<ParseWarning>,
}

impl ParsedHand {
    pub fn hero(&self) -> Option<&PlayerInHand> {
        self.players.iter().find(|p| p.is_hero)
    }

    pub fn player(&self, username: &str) -> Option<&PlayerInHand> {
        self.players.iter().find(|p| p.username == username)
    }

    /// The hand reached the flop if any flop cards were dealt.
    pub fn saw_flop(&self) -> bool {
        self.hand.board_flop.is_some()
    }

    pub fn actions_on(&self, street: Street) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.street == street)
    }
}

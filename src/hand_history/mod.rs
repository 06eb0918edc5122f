//! # PokerStars Hand History Parsing
//!
//! Turns the text of a PokerStars hold'em session file into exact, self
//! consistent records of every hand: who sat where with how much, every
//! action with the pot it went into, and how much each player won or lost.
//!
//! ## Pipeline
//!
//! - **Splitting**: [`split_hands`] cuts a file into hand blocks.
//! - **Header**: the hand and table lines give the stakes, currency, table
//!   and button. Cash games and tournaments have different hand lines.
//! - **Seats**: seat lines give each player's starting stack.
//! - **Betting**: a state machine walks the body, tracking the running pot
//!   and what everyone committed per street and per hand.
//! - **Summary**: the summary section gives the final pot, rake, board and
//!   who collected what.
//! - **Record building**: the pieces are merged into a [`ParsedHand`] with
//!   positions, net results, VPIP/PFR flags, SPR and MDF.
//!
//! All amounts are [`rust_decimal::Decimal`] so the pot always reconciles.
//!
//! ## Usage
//!
//! ```no_run
//! use rs_poker_ledger::hand_history::{split_hands, HandParser};
//!
//! let text = std::fs::read_to_string("session.txt").unwrap();
//! let parser = HandParser::new("hero");
//! for block in split_hands(&text) {
//!     match parser.parse(&block) {
//!         Ok(hand) => println!("{} {}", hand.hand.hand_id, hand.actions.len()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```
mod betting;
mod builder;
mod errors;
mod header;
mod lines;
mod model;
mod parser;
mod seats;
mod splitter;
mod summary;

#[cfg(any(test, feature = "test-util"))]
mod test_util;

pub use betting::{walk_body, BettingOutcome, BettingState, RawAction, Wager};
pub use builder::{build_record, HandParts};
pub use errors::HandParseError;
pub use header::{parse_header, HandHeader};
pub use model::*;
pub use parser::HandParser;
pub use seats::{SeatInfo, SeatMap};
pub use splitter::{split_hands, HAND_MARKER};
pub use summary::{parse_seat_outcome, HandSummary, SeatOutcome};

#[cfg(any(test, feature = "test-util"))]
pub use test_util::*;

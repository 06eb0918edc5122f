//! # rs_poker_ledger
//!
//! Parses PokerStars hold'em hand histories into an exact ledger of seats,
//! stacks, pots and actions, and derives player statistics from it.
//!
//! - [`hand_history`] splits session files into hands and turns each one
//!   into a [`hand_history::ParsedHand`] whose numbers always reconcile.
//! - [`stats`] computes VPIP, PFR, 3-bet%, c-bet%, aggression factor and
//!   friends from parsed hands.
//! - [`store`] keeps parsed hands and refuses duplicates.
//! - [`ingest`] drives whole files and directories through the parser into
//!   a store, isolating failures per hand.
//!
//! ```
//! use rs_poker_ledger::hand_history::HandParser;
//! use rs_poker_ledger::ingest::ingest_text;
//! use rs_poker_ledger::stats::SequenceCounts;
//! use rs_poker_ledger::store::{HandStore, InMemoryHandStore};
//!
//! let text = "\
//! PokerStars Hand #7: Hold'em No Limit ($0.01/$0.02) - 2026/01/01 12:00:00 ET
//! Table 'Example' 6-max Seat #1 is the button
//! Seat 1: hero ($2 in chips)
//! Seat 2: villain ($2 in chips)
//! hero: posts small blind $0.01
//! villain: posts big blind $0.02
//! *** HOLE CARDS ***
//! Dealt to hero [Ah Kh]
//! hero: raises $0.04 to $0.06
//! villain: calls $0.04
//! *** FLOP *** [2c 7d Ts]
//! villain: checks
//! hero: bets $0.08
//! villain: folds
//! Uncalled bet ($0.08) returned to hero
//! hero collected $0.12 from pot
//! *** SUMMARY ***
//! Total pot $0.12 | Rake $0
//! Board [2c 7d Ts]
//! Seat 1: hero (button) (small blind) collected ($0.12)
//! Seat 2: villain (big blind) folded on the Flop";
//!
//! let parser = HandParser::new("hero");
//! let mut store = InMemoryHandStore::new();
//! let result = ingest_text(&parser, &mut store, "sample", text);
//! assert_eq!(1, result.ingested);
//!
//! let counts = SequenceCounts::from_hands(&store.hand_actions());
//! assert_eq!(1, counts.cbet_opportunities);
//! assert_eq!(1.0, counts.cbet_pct());
//! ```
pub mod config;
pub mod core;
pub mod hand_history;
pub mod ingest;
pub mod stats;
pub mod store;

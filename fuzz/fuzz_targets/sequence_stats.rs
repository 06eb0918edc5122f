#![no_main]

extern crate approx;
extern crate arbitrary;
extern crate libfuzzer_sys;
extern crate rs_poker_ledger;

use approx::assert_relative_eq;
use libfuzzer_sys::fuzz_target;
use rs_poker_ledger::stats::{aggression_factor, cbet_pct, three_bet_pct, HandActions, SequenceCounts};

fuzz_target!(|hands: Vec<HandActions>| {
    let hands: Vec<HandActions> = hands
        .into_iter()
        .map(|h| HandActions::new(h.hand_id, h.saw_flop, h.rows))
        .collect();
    let counts = SequenceCounts::from_hands(&hands);

    assert!(counts.three_bets <= counts.three_bet_opportunities);
    assert!(counts.cbets <= counts.cbet_opportunities);
    assert!((0.0..=1.0).contains(&three_bet_pct(&hands)));
    assert!((0.0..=1.0).contains(&cbet_pct(&hands)));
    assert_relative_eq!(counts.three_bet_pct(), three_bet_pct(&hands));
    assert_relative_eq!(counts.cbet_pct(), cbet_pct(&hands));

    let af = aggression_factor(hands.iter().flat_map(|h| h.rows.iter()).filter(|r| r.is_hero));
    assert!(af >= 0.0);

    let mut merged = SequenceCounts::new();
    for hand in &hands {
        merged.merge(&SequenceCounts::from_hands(std::iter::once(hand)));
    }
    assert_eq!(counts, merged);
});

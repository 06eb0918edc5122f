#![no_main]

extern crate libfuzzer_sys;
extern crate rs_poker_ledger;

use libfuzzer_sys::fuzz_target;
use rs_poker_ledger::hand_history::{assert_parsed_hand_structure, split_hands, HandParser};

fuzz_target!(|data: &str| {
    let parser = HandParser::new("hero");
    for block in split_hands(data) {
        if let Ok(hand) = parser.parse(&block) {
            assert!(hand.actions.len() + hand.warnings.len() < block.lines().count());
            assert_parsed_hand_structure(&hand);
        }
    }
});

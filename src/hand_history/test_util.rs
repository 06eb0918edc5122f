use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::core::{ActionKind, Street};

use super::ParsedHand;

/// A six-max cash game hand that goes to showdown after a 3-bet.
pub const SAMPLE_CASH_HAND: &str = "\
PokerStars Hand #259603207505:  Hold'em No Limit ($0.05/$0.10 USD) - 2026/02/05 18:41:05 CET [2026/02/05 12:41:05 ET]
Table 'Vigdis' 6-max Seat #1 is the button
Seat 1: villainA ($10 in chips)
Seat 2: villainB ($12.50 in chips)
Seat 3: hero ($10 in chips)
Seat 5: villainC ($8 in chips)
Seat 6: sleeper ($5 in chips) is sitting out
villainB: posts small blind $0.05
hero: posts big blind $0.10
*** HOLE CARDS ***
Dealt to hero [Qs Qh]
villainC: raises $0.20 to $0.30
villainA is disconnected
villainA: folds
villainB: folds
hero: raises $0.60 to $0.90
villainC: calls $0.60
*** FLOP *** [2d 7c Ks]
hero: bets $1.20
villainC: calls $1.20
*** TURN *** [2d 7c Ks] [4h]
hero: checks
villainC: bets $2
hero: calls $2
*** RIVER *** [2d 7c Ks 4h] [9s]
hero: checks
villainC: checks
*** SHOW DOWN ***
hero: shows [Qs Qh] (a pair of Queens)
villainC: mucks hand
hero collected $7.99 from pot
*** SUMMARY ***
Total pot $8.25 | Rake $0.26
Board [2d 7c Ks 4h 9s]
Seat 1: villainA (button) folded before Flop (didn't bet)
Seat 2: villainB (small blind) folded before Flop
Seat 3: hero (big blind) showed [Qs Qh] and won ($7.99) with a pair of Queens
Seat 5: villainC mucked [Jc Jd]
Seat 6: sleeper is sitting out";

/// A three-handed tournament hand with antes and a preflop all-in.
pub const SAMPLE_TOURNAMENT_HAND: &str = "\
PokerStars Hand #259603300001: Tournament #3970436932, 13200+1800 Hold'em No Limit - Level II (15/30) - 2026/02/05 19:02:44 CET [2026/02/05 13:02:44 ET]
Table '3970436932 1' 9-max Seat #4 is the button
Seat 2: bigstack (3000 in chips)
Seat 4: hero (1500 in chips)
Seat 7: shorty (200 in chips)
bigstack: posts the ante 5
hero: posts the ante 5
shorty: posts the ante 5
shorty: posts small blind 15
bigstack: posts big blind 30
*** HOLE CARDS ***
Dealt to hero [9c 9d]
hero: raises 45 to 75
shorty: raises 120 to 195 and is all-in
bigstack: folds
hero: calls 120
*** FLOP *** [2c 3d Qh]
*** TURN *** [2c 3d Qh] [5s]
*** RIVER *** [2c 3d Qh 5s] [8h]
*** SHOW DOWN ***
shorty: shows [Ah Kd] (high card Ace)
hero: shows [9c 9d] (a pair of Nines)
hero collected 435 from pot
*** SUMMARY ***
Total pot 435 | Rake 0
Board [2c 3d Qh 5s 8h]
Seat 2: bigstack (big blind) folded before Flop
Seat 4: hero (button) showed [9c 9d] and won (435) with a pair of Nines
Seat 7: shorty (small blind) showed [Ah Kd] and lost with high card Ace";

/// Assert that a parsed hand is internally consistent.
///
/// Checks sequence numbering, pot conservation, where stack to pot ratios
/// and minimum defense frequencies may appear, and that the VPIP and PFR
/// flags agree with the preflop actions.
pub fn assert_valid_parsed_hand(hand: &ParsedHand) {
    let id = &hand.hand.hand_id;

    assert_parsed_hand_structure(hand);
    assert_pot_conserved(hand);
    assert_mdf_definition(hand);

    for action in &hand.actions {
        assert!(
            action.amount >= Decimal::ZERO && action.amount_to_call >= Decimal::ZERO,
            "Hand {id} action {seq} has a negative amount",
            seq = action.sequence
        );
        if action.kind.is_forced() {
            assert_eq!(
                Street::Preflop,
                action.street,
                "Hand {id} has a forced bet after preflop"
            );
        }
    }
}

/// The checks that hold for any block the parser accepts, however
/// inconsistent its amounts are.
pub fn assert_parsed_hand_structure(hand: &ParsedHand) {
    let id = &hand.hand.hand_id;

    assert_contiguous_sequences(hand);
    assert_single_spr(hand);
    assert_voluntary_flags(hand);

    let mut seen = HashSet::new();
    for player in &hand.players {
        assert!(
            seen.insert(player.username.as_str()),
            "Hand {id} lists {name} twice",
            name = player.username
        );
    }
    assert!(
        hand.players.iter().filter(|p| p.is_hero).count() <= 1,
        "Hand {id} has more than one hero"
    );
}

fn assert_contiguous_sequences(hand: &ParsedHand) {
    for (idx, action) in hand.actions.iter().enumerate() {
        assert_eq!(
            idx as u32 + 1,
            action.sequence,
            "Hand {id} has a gap in its action sequence",
            id = hand.hand.hand_id
        );
    }
}

fn assert_pot_conserved(hand: &ParsedHand) {
    let total: Decimal = hand.players.iter().map(|p| p.net_result).sum();
    assert_eq!(
        -hand.hand.rake,
        total,
        "Hand {id} net results don't add up to the rake",
        id = hand.hand.hand_id
    );
}

fn assert_single_spr(hand: &ParsedHand) {
    let with_spr: Vec<u32> = hand
        .actions
        .iter()
        .filter(|a| a.spr.is_some())
        .map(|a| a.sequence)
        .collect();
    assert!(
        with_spr.len() <= 1,
        "Hand {id} has more than one SPR: {with_spr:?}",
        id = hand.hand.hand_id
    );

    if let Some(&sequence) = with_spr.first() {
        let first_hero_flop = hand
            .actions
            .iter()
            .find(|a| a.is_hero && a.street == Street::Flop)
            .map(|a| a.sequence);
        assert_eq!(
            Some(sequence),
            first_hero_flop,
            "Hand {id} has an SPR that isn't on hero's first flop action",
            id = hand.hand.hand_id
        );
    }
}

fn assert_mdf_definition(hand: &ParsedHand) {
    for action in &hand.actions {
        let facing_bet = action.is_hero && action.amount_to_call > Decimal::ZERO;
        match action.mdf {
            Some(mdf) => {
                assert!(
                    facing_bet,
                    "Hand {id} action {seq} has an MDF without hero facing a bet",
                    id = hand.hand.hand_id,
                    seq = action.sequence
                );
                assert_eq!(
                    action.pot_before / (action.pot_before + action.amount_to_call),
                    mdf,
                    "Hand {id} action {seq} has the wrong MDF",
                    id = hand.hand.hand_id,
                    seq = action.sequence
                );
            }
            None => assert!(
                !facing_bet,
                "Hand {id} action {seq} is missing its MDF",
                id = hand.hand.hand_id,
                seq = action.sequence
            ),
        }
    }
}

fn assert_voluntary_flags(hand: &ParsedHand) {
    for player in &hand.players {
        let preflop: Vec<ActionKind> = hand
            .actions_on(Street::Preflop)
            .filter(|a| a.player == player.username)
            .map(|a| a.kind)
            .collect();
        let called_or_raised = preflop
            .iter()
            .any(|k| matches!(k, ActionKind::Call | ActionKind::Raise));
        let raised = preflop.contains(&ActionKind::Raise);

        assert_eq!(
            called_or_raised,
            player.vpip,
            "Hand {id} has the wrong VPIP for {name}",
            id = hand.hand.hand_id,
            name = player.username
        );
        assert_eq!(
            raised,
            player.pfr,
            "Hand {id} has the wrong PFR for {name}",
            id = hand.hand.hand_id,
            name = player.username
        );
    }
}

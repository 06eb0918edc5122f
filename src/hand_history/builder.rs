use std::collections::{BTreeMap, BTreeSet, HashMap};

use rust_decimal::Decimal;

use crate::core::{ActionKind, Position, Street};

use super::betting::{BettingOutcome, RawAction};
use super::header::HandHeader;
use super::model::{Action, HandRecord, ParsedHand, PlayerInHand};
use super::seats::SeatMap;
use super::summary::HandSummary;

/// The independently parsed pieces of one hand block.
#[derive(Debug, Clone)]
pub struct HandParts {
    pub header: HandHeader,
    pub seats: SeatMap,
    pub betting: BettingOutcome,
    pub summary: HandSummary,
}

/// Merge the parsed pieces into the final record for `hero`.
pub fn build_record(hero: &str, parts: HandParts) -> ParsedHand {
    let HandParts {
        header,
        mut seats,
        betting,
        summary,
    } = parts;
    for (player, cards) in &betting.dealt_cards {
        seats.set_hole_cards(player, cards);
    }

    let mut session = header.session;
    if let Some(ante) = betting.ante {
        session.ante = ante;
    }

    let anchor = position_anchor(header.button_seat, &seats, &betting);
    let players = build_players(hero, anchor, &seats, &betting, &summary);
    let actions = build_actions(hero, &seats, &betting.actions);

    let hand = HandRecord {
        hand_id: header.hand_id,
        timestamp: header.timestamp,
        button_seat: header.button_seat,
        board_flop: summary.board_flop,
        board_turn: summary.board_turn,
        board_river: summary.board_river,
        total_pot: summary.total_pot,
        rake: summary.rake,
        uncalled_bet_returned: betting.uncalled_returned,
    };

    ParsedHand {
        session,
        hand,
        players,
        actions,
        warnings: betting.warnings,
    }
}

/// The seat positions are counted from.
///
/// That's the button seat from the table line unless nobody sits there. Then
/// the seat before the natural small blind plays the button, or the small
/// blind itself heads up.
fn position_anchor(button_seat: usize, seats: &SeatMap, betting: &BettingOutcome) -> usize {
    let mut seat_numbers = seats.seat_numbers();
    if seat_numbers.contains(&button_seat) {
        return button_seat;
    }
    let Some(small_blind) = betting
        .natural_small_blind()
        .and_then(|name| seats.get(name))
        .map(|s| s.seat)
    else {
        return button_seat;
    };

    seat_numbers.sort_unstable();
    seat_numbers.dedup();
    let num_seats = seat_numbers.len();
    if num_seats == 2 {
        return small_blind;
    }
    match seat_numbers.iter().position(|&s| s == small_blind) {
        Some(idx) => seat_numbers[(idx + num_seats - 1) % num_seats],
        None => button_seat,
    }
}

fn build_players(
    hero: &str,
    button_seat: usize,
    seats: &SeatMap,
    betting: &BettingOutcome,
    summary: &HandSummary,
) -> Vec<PlayerInHand> {
    let positions: HashMap<usize, Position> = Position::assign(&seats.seat_numbers(), button_seat)
        .into_iter()
        .collect();

    let mut vpip = BTreeSet::new();
    let mut pfr = BTreeSet::new();
    for raw in betting.actions.iter().filter(|a| a.street == Street::Preflop) {
        match raw.wager.kind() {
            ActionKind::Call => {
                vpip.insert(raw.player.as_str());
            }
            ActionKind::Raise => {
                vpip.insert(raw.player.as_str());
                pfr.insert(raw.player.as_str());
            }
            _ => {}
        }
    }

    seats
        .iter()
        .map(|seat| {
            let name = seat.username.as_str();
            let collected = summary.collected.get(name).copied().unwrap_or_default();
            let committed = betting
                .hand_committed
                .get(name)
                .copied()
                .unwrap_or_default();
            let hole_cards = seat
                .hole_cards
                .as_ref()
                .or_else(|| betting.showdown_cards.get(name))
                .or_else(|| summary.shown_cards.get(name))
                .cloned();

            PlayerInHand {
                username: seat.username.clone(),
                seat: seat.seat,
                starting_stack: seat.starting_stack,
                position: positions
                    .get(&seat.seat)
                    .copied()
                    .unwrap_or(Position::Other(0)),
                hole_cards,
                net_result: collected - committed,
                vpip: vpip.contains(name),
                pfr: pfr.contains(name),
                went_to_showdown: betting.showdown_players.contains(name),
                is_hero: name == hero,
                sitting_out: seat.sitting_out,
            }
        })
        .collect()
}

/// What everyone had behind when the flop was dealt, and who was already
/// out of the hand by then.
struct FlopStacks {
    stacks: BTreeMap<String, Decimal>,
    folded: BTreeSet<String>,
}

impl FlopStacks {
    fn new(seats: &SeatMap, actions: &[RawAction]) -> Self {
        let mut invested: HashMap<&str, Decimal> = HashMap::new();
        let mut folded = BTreeSet::new();
        for raw in actions.iter().filter(|a| a.street == Street::Preflop) {
            if raw.wager.kind() == ActionKind::Fold {
                folded.insert(raw.player.clone());
            }
            *invested.entry(raw.player.as_str()).or_default() += raw.wager.contribution();
        }

        let stacks = seats
            .iter()
            .filter(|s| !s.sitting_out)
            .map(|s| {
                let spent = invested
                    .get(s.username.as_str())
                    .copied()
                    .unwrap_or_default();
                (s.username.clone(), s.starting_stack - spent)
            })
            .collect();

        FlopStacks { stacks, folded }
    }

    /// Smaller of hero's stack and the smallest stack of a villain who
    /// is still in the hand with chips behind.
    fn effective(&self, hero: &str) -> Option<Decimal> {
        let hero_stack = *self.stacks.get(hero)?;
        let villain_stack = self
            .stacks
            .iter()
            .filter(|(name, stack)| {
                name.as_str() != hero && **stack > Decimal::ZERO && !self.folded.contains(*name)
            })
            .map(|(_, stack)| *stack)
            .min()?;
        Some(hero_stack.min(villain_stack))
    }
}

fn build_actions(hero: &str, seats: &SeatMap, raw_actions: &[RawAction]) -> Vec<Action> {
    let flop_stacks = FlopStacks::new(seats, raw_actions);
    let mut spr_done = false;

    raw_actions
        .iter()
        .map(|raw| {
            let is_hero = raw.player == hero;

            let mut spr = None;
            if is_hero && raw.street == Street::Flop && !spr_done {
                spr_done = true;
                if raw.pot_before > Decimal::ZERO {
                    spr = flop_stacks
                        .effective(hero)
                        .and_then(|effective| effective.checked_div(raw.pot_before));
                }
            }

            let mdf = if is_hero && raw.amount_to_call > Decimal::ZERO {
                raw.pot_before
                    .checked_div(raw.pot_before + raw.amount_to_call)
            } else {
                None
            };

            Action {
                sequence: raw.sequence,
                player: raw.player.clone(),
                is_hero,
                street: raw.street,
                kind: raw.wager.kind(),
                amount: raw.wager.logged_amount(),
                amount_to_call: raw.amount_to_call,
                pot_before: raw.pot_before,
                is_all_in: raw.is_all_in,
                spr,
                mdf,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::hand_history::betting::walk_body;
    use crate::hand_history::model::SessionMeta;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn header(button_seat: usize) -> HandHeader {
        HandHeader {
            session: SessionMeta {
                table_name: "T".to_string(),
                game_type: "NLHE".to_string(),
                limit_type: "NL".to_string(),
                small_blind: d("1"),
                big_blind: d("2"),
                ante: Decimal::ZERO,
                max_seats: 6,
                is_tournament: false,
                tournament_id: None,
                tournament_level: None,
                tournament_buy_in: None,
                currency: "USD".to_string(),
            },
            hand_id: "42".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2026, 2, 5)
                .and_then(|d| d.and_hms_opt(18, 0, 0))
                .unwrap(),
            button_seat,
        }
    }

    fn parts(seat_lines: &[&str], body: &[&str], summary: &[&str], button: usize) -> HandParts {
        HandParts {
            header: header(button),
            seats: SeatMap::parse(seat_lines.iter().copied()),
            betting: walk_body(body, 2),
            summary: HandSummary::parse(summary.iter().copied()),
        }
    }

    #[test]
    fn test_three_way_flop() {
        let hand = build_record(
            "hero",
            parts(
                &[
                    "Seat 1: btn (200 in chips)",
                    "Seat 2: sb (50 in chips)",
                    "Seat 4: hero (300 in chips)",
                    "Seat 5: napper (80 in chips) is sitting out",
                ],
                &[
                    "sb: posts small blind 1",
                    "hero: posts big blind 2",
                    "*** HOLE CARDS ***",
                    "Dealt to hero [Ah Kh]",
                    "btn: raises 4 to 6",
                    "sb: calls 5",
                    "hero: calls 4",
                    "*** FLOP *** [2c 7d 9h]",
                    "sb: checks",
                    "hero: checks",
                    "btn: bets 10",
                    "sb: folds",
                    "hero: calls 10",
                    "*** TURN *** [2c 7d 9h] [Ts]",
                    "hero: checks",
                    "btn: checks",
                    "*** RIVER *** [2c 7d 9h Ts] [Js]",
                    "hero: bets 20",
                    "btn: folds",
                    "Uncalled bet (20) returned to hero",
                    "hero collected 37 from pot",
                ],
                &[
                    "*** SUMMARY ***",
                    "Total pot 38 | Rake 1",
                    "Board [2c 7d 9h Ts Js]",
                    "Seat 1: btn (button) folded on the River",
                    "Seat 2: sb (small blind) folded on the Flop",
                    "Seat 4: hero (big blind) collected (37)",
                ],
                1,
            ),
        );

        let hero = hand.hero().unwrap();
        assert_eq!(Position::BigBlind, hero.position);
        assert_eq!(Some("Ah Kh".to_string()), hero.hole_cards);
        assert_eq!(d("21"), hero.net_result);
        assert!(hero.vpip);
        assert!(!hero.pfr);

        let btn = hand.player("btn").unwrap();
        assert_eq!(Position::Button, btn.position);
        assert!(btn.vpip && btn.pfr);
        assert_eq!(d("-16"), btn.net_result);
        assert_eq!(d("-6"), hand.player("sb").unwrap().net_result);
        assert_eq!(Position::SmallBlind, hand.player("sb").unwrap().position);
        assert!(hand.player("napper").unwrap().sitting_out);

        let total: Decimal = hand.players.iter().map(|p| p.net_result).sum();
        assert_eq!(-hand.hand.rake, total);
        assert_eq!(d("20"), hand.hand.uncalled_bet_returned);
        assert_eq!(Some("Js".to_string()), hand.hand.board_river);

        // Only hero's first flop action has an SPR: min(294, 44) / 18.
        let with_spr: Vec<&Action> = hand.actions.iter().filter(|a| a.spr.is_some()).collect();
        assert_eq!(1, with_spr.len());
        assert_eq!(7, with_spr[0].sequence);
        assert_eq!(Some(d("44") / d("18")), with_spr[0].spr);

        // Hero faced 4 into 14 preflop and 10 into 28 on the flop.
        let mdfs: Vec<(u32, Decimal)> = hand
            .actions
            .iter()
            .filter_map(|a| a.mdf.map(|m| (a.sequence, m)))
            .collect();
        assert_eq!(
            vec![(5, d("14") / d("18")), (10, d("28") / d("38"))],
            mdfs
        );
    }

    #[test]
    fn test_empty_button_seat_uses_small_blind() {
        let hand = build_record(
            "sb",
            parts(
                &[
                    "Seat 1: bb (100 in chips)",
                    "Seat 2: btn (100 in chips)",
                    "Seat 4: sb (100 in chips)",
                ],
                &[
                    "sb: posts small blind 1",
                    "bb: posts big blind 2",
                    "*** HOLE CARDS ***",
                    "Dealt to sb [Ah Kh]",
                    "btn: folds",
                    "sb: calls 1",
                    "bb: checks",
                    "*** FLOP *** [2c 7d 9h]",
                    "sb: checks",
                    "bb: checks",
                    "*** SHOW DOWN ***",
                    "bb: shows [2c 3c] (a pair of Deuces)",
                    "sb: shows [Ah Kh] (high card Ace)",
                    "bb collected 4 from pot",
                ],
                &[
                    "*** SUMMARY ***",
                    "Total pot 4 | Rake 0",
                    "Board [2c 7d 9h]",
                    "Seat 1: bb (big blind) showed [2c 3c] and won (4) with a pair of Deuces",
                    "Seat 2: btn folded before Flop (didn't bet)",
                    "Seat 4: sb (small blind) showed [5d 6d] and lost with high card Ace",
                ],
                3,
            ),
        );

        assert_eq!(3, hand.hand.button_seat);
        assert_eq!(Position::Button, hand.player("btn").unwrap().position);
        assert_eq!(Position::SmallBlind, hand.player("sb").unwrap().position);
        assert_eq!(Position::BigBlind, hand.player("bb").unwrap().position);

        // The dealt cards win over anything the summary says.
        assert_eq!(
            Some("Ah Kh".to_string()),
            hand.player("sb").unwrap().hole_cards
        );
        assert_eq!(
            Some("2c 3c".to_string()),
            hand.player("bb").unwrap().hole_cards
        );
        assert_eq!(None, hand.player("btn").unwrap().hole_cards);
    }

    #[test]
    fn test_big_blind_check_is_not_vpip() {
        let hand = build_record(
            "hero",
            parts(
                &["Seat 1: sb (100 in chips)", "Seat 2: hero (100 in chips)"],
                &[
                    "sb: posts small blind 1",
                    "hero: posts big blind 2",
                    "*** HOLE CARDS ***",
                    "sb: calls 1",
                    "hero: checks",
                ],
                &["*** SUMMARY ***", "Total pot 4 | Rake 0"],
                1,
            ),
        );
        assert!(!hand.hero().unwrap().vpip);
        assert!(hand.player("sb").unwrap().vpip);
        assert_eq!(Position::BigBlind, hand.hero().unwrap().position);
    }

    #[test]
    fn test_ante_moves_to_session_and_hole_cards_from_showdown() {
        let hand = build_record(
            "hero",
            parts(
                &["Seat 1: a (100 in chips)", "Seat 2: hero (100 in chips)"],
                &[
                    "a: posts the ante 1",
                    "hero: posts the ante 1",
                    "a: posts small blind 5",
                    "hero: posts big blind 10",
                    "*** HOLE CARDS ***",
                    "a: raises 89 to 99 and is all-in",
                    "hero: calls 89 and is all-in",
                    "*** SHOW DOWN ***",
                    "a: shows [Kc Kd]",
                    "hero: shows [Ac Ad]",
                ],
                &[
                    "*** SUMMARY ***",
                    "Total pot 200 | Rake 0",
                    "Seat 1: a showed [Kc Kd] and lost",
                    "Seat 2: hero showed [Ac Ad] and won (200)",
                ],
                1,
            ),
        );
        assert_eq!(d("1"), hand.session.ante);
        assert_eq!(Some("Kc Kd".to_string()), hand.player("a").unwrap().hole_cards);
        assert!(hand.player("a").unwrap().went_to_showdown);
        assert_eq!(d("100"), hand.hero().unwrap().net_result);
        assert_eq!(d("-100"), hand.player("a").unwrap().net_result);
        assert!(hand.actions[5].is_all_in);
        assert!(hand.actions.iter().all(|a| a.spr.is_none()));
    }

    #[test]
    fn test_no_spr_without_live_villain() {
        let hand = build_record(
            "hero",
            parts(
                &["Seat 1: a (10 in chips)", "Seat 2: hero (100 in chips)"],
                &[
                    "a: posts small blind 1",
                    "hero: posts big blind 2",
                    "*** HOLE CARDS ***",
                    "a: raises 8 to 10 and is all-in",
                    "hero: calls 8",
                    "*** FLOP *** [2c 7d 9h]",
                    "hero: checks",
                ],
                &["*** SUMMARY ***", "Total pot 20 | Rake 0"],
                1,
            ),
        );
        assert!(hand.actions.iter().all(|a| a.spr.is_none()));
    }
}

use tracing::debug;

use super::betting::walk_body;
use super::builder::{build_record, HandParts};
use super::errors::HandParseError;
use super::header::parse_header;
use super::lines::SUMMARY_MARKER;
use super::model::ParsedHand;
use super::seats::SeatMap;
use super::summary::HandSummary;

/// Turns single hand blocks into [`ParsedHand`]s from one player's point of
/// view.
///
/// # Example
///
/// ```
/// use rs_poker_ledger::hand_history::HandParser;
///
/// let text = "\
/// PokerStars Hand #1: Hold'em No Limit ($0.01/$0.02) - 2026/01/01 12:00:00 ET
/// Table 'Example' 6-max Seat #1 is the button
/// Seat 1: villain ($2 in chips)
/// Seat 2: hero ($2 in chips)
/// villain: posts small blind $0.01
/// hero: posts big blind $0.02
/// *** HOLE CARDS ***
/// Dealt to hero [Ah Kh]
/// villain: folds
/// Uncalled bet ($0.01) returned to hero
/// hero collected $0.02 from pot
/// *** SUMMARY ***
/// Total pot $0.02 | Rake $0
/// Seat 1: villain (button) (small blind) folded before Flop
/// Seat 2: hero (big blind) collected ($0.02)";
///
/// let hand = HandParser::new("hero").parse(text).unwrap();
/// assert_eq!("1", hand.hand.hand_id);
/// assert_eq!(3, hand.actions.len());
/// assert_eq!(Some("Ah Kh".to_string()), hand.hero().unwrap().hole_cards);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandParser {
    hero: String,
}

impl HandParser {
    pub fn new(hero: impl Into<String>) -> Self {
        Self { hero: hero.into() }
    }

    pub fn hero(&self) -> &str {
        &self.hero
    }

    /// Parse one hand block as produced by
    /// [`split_hands`](super::split_hands).
    ///
    /// Fails only when the block is empty or when its hand or table line
    /// can't be parsed. Everything else is tolerated.
    pub fn parse(&self, text: &str) -> Result<ParsedHand, HandParseError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect();

        let (hand_line, table_line) = match lines.as_slice() {
            [] => return Err(HandParseError::EmptyBlock),
            [only] => {
                return Err(HandParseError::TableParse {
                    line: only.to_string(),
                })
            }
            [hand_line, table_line, ..] => (*hand_line, *table_line),
        };

        let header = parse_header(hand_line.trim(), table_line.trim())?;
        let body = &lines[2..];
        let parts = HandParts {
            header,
            seats: SeatMap::parse(
                body.iter()
                    .copied()
                    .take_while(|line| !line.trim().starts_with(SUMMARY_MARKER)),
            ),
            betting: walk_body(body, 2),
            summary: HandSummary::parse(body.iter().copied()),
        };

        let hand = build_record(&self.hero, parts);
        debug!(
            hand_id = %hand.hand.hand_id,
            actions = hand.actions.len(),
            warnings = hand.warnings.len(),
            "Parsed hand"
        );
        Ok(hand)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::core::{ActionKind, Position, Street};
    use crate::hand_history::test_util::{
        assert_valid_parsed_hand, SAMPLE_CASH_HAND as CASH_HAND,
        SAMPLE_TOURNAMENT_HAND as TOURNAMENT_HAND,
    };

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test_log::test]
    fn test_parse_cash_hand() {
        let hand = HandParser::new("hero").parse(CASH_HAND).unwrap();
        assert_valid_parsed_hand(&hand);

        assert_eq!("USD", hand.session.currency);
        assert_eq!(5, hand.players.len());
        assert_eq!(14, hand.actions.len());
        assert!(hand.warnings.is_empty());
        assert_eq!(d("8.25"), hand.hand.total_pot);
        assert_eq!(Some("2d 7c Ks".to_string()), hand.hand.board_flop);

        let hero = hand.hero().unwrap();
        assert_eq!(Position::BigBlind, hero.position);
        assert!(hero.vpip && hero.pfr && hero.went_to_showdown);
        assert_eq!(d("3.89"), hero.net_result);

        let villain = hand.player("villainC").unwrap();
        assert_eq!(Position::UnderTheGun, villain.position);
        assert_eq!(Some("Jc Jd".to_string()), villain.hole_cards);
        assert_eq!(d("-4.10"), villain.net_result);
        assert!(villain.went_to_showdown);

        assert_eq!(Position::Cutoff, hand.player("sleeper").unwrap().position);
        assert!(hand.player("sleeper").unwrap().sitting_out);

        let three_bet = &hand.actions[5];
        assert_eq!(ActionKind::Raise, three_bet.kind);
        assert_eq!(d("0.90"), three_bet.amount);
        assert_eq!(d("0.20"), three_bet.amount_to_call);
        assert_eq!(d("0.45"), three_bet.pot_before);

        let flop_bet = &hand.actions[7];
        assert_eq!(Street::Flop, flop_bet.street);
        assert_eq!(Some(d("7.10") / d("1.85")), flop_bet.spr);
    }

    #[test_log::test]
    fn test_parse_tournament_hand() {
        let hand = HandParser::new("hero").parse(TOURNAMENT_HAND).unwrap();
        assert_valid_parsed_hand(&hand);

        assert!(hand.session.is_tournament);
        assert_eq!(d("5"), hand.session.ante);
        assert_eq!(Some("Level II".to_string()), hand.session.tournament_level);

        let shorty = hand.player("shorty").unwrap();
        assert_eq!(d("-200"), shorty.net_result);
        assert_eq!(Some("Ah Kd".to_string()), shorty.hole_cards);

        let call = hand.actions.last().unwrap();
        assert_eq!(ActionKind::Call, call.kind);
        assert!(call.is_all_in);
        assert_eq!(d("120"), call.amount_to_call);
        assert_eq!(Some(d("315") / d("435")), call.mdf);
    }

    #[test]
    fn test_unknown_lines_become_warnings() {
        let text = CASH_HAND.replace(
            "villainA is disconnected",
            "villainA: throws a chip at the dealer",
        );
        let hand = HandParser::new("hero").parse(&text).unwrap();
        assert_eq!(1, hand.warnings.len());
        assert_eq!(12, hand.warnings[0].line_number);
        assert_eq!(14, hand.actions.len());
    }

    #[test]
    fn test_sitting_out_is_not_a_warning() {
        let text = CASH_HAND.replace("villainA is disconnected", "villainA: sits out");
        let hand = HandParser::new("hero").parse(&text).unwrap();
        assert!(hand.warnings.is_empty());
        assert_eq!(14, hand.actions.len());
    }

    #[test]
    fn test_oversized_amounts_become_warnings() {
        let huge = "79228162514264337593543950335";
        let text = CASH_HAND
            .replace(
                "villainB: posts small blind $0.05",
                &format!("villainB: posts small blind {huge}"),
            )
            .replace(
                "hero: posts big blind $0.10",
                &format!("hero: posts big blind {huge}"),
            );
        let hand = HandParser::new("hero").parse(&text).unwrap();
        assert_eq!(2, hand.warnings.len());
        assert_eq!(12, hand.actions.len());
        assert!(hand.actions.iter().all(|a| a.kind != ActionKind::PostBlind));
    }

    #[test]
    fn test_oversized_blinds_in_header() {
        let text = CASH_HAND.replace("($0.05/$0.10 USD)", "($0.05/$99999999999999999 USD)");
        assert_eq!(
            Err(HandParseError::InvalidAmount {
                value: "99999999999999999".to_string()
            }),
            HandParser::new("hero").parse(&text)
        );
    }

    #[test]
    fn test_hero_not_seated() {
        let hand = HandParser::new("nobody").parse(CASH_HAND).unwrap();
        assert!(hand.hero().is_none());
        assert!(hand.actions.iter().all(|a| !a.is_hero && a.mdf.is_none()));
    }

    #[test]
    fn test_empty_and_truncated_blocks() {
        let parser = HandParser::new("hero");
        assert_eq!(Err(HandParseError::EmptyBlock), parser.parse(" \n\n"));

        let first_line = CASH_HAND.lines().next().unwrap();
        assert_eq!(
            Err(HandParseError::TableParse {
                line: first_line.to_string()
            }),
            parser.parse(first_line)
        );
    }
}

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::core::parse_amount;

use super::lines::{
    strip_annotations, BOARD, SUMMARY_COLLECTED, SUMMARY_FOLDED, SUMMARY_MARKER, SUMMARY_MUCKED,
    SUMMARY_POT, SUMMARY_SHOWED,
};

/// How a single seat finished the hand according to the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatOutcome {
    Showed {
        cards: String,
        won: Option<Decimal>,
    },
    Mucked {
        cards: String,
    },
    Collected {
        amount: Decimal,
    },
    Folded,
}

/// The trailing summary section of a hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandSummary {
    pub total_pot: Decimal,
    pub rake: Decimal,
    pub board_flop: Option<String>,
    pub board_turn: Option<String>,
    pub board_river: Option<String>,
    /// Total won per username.
    pub collected: BTreeMap<String, Decimal>,
    /// Cards shown or mucked at showdown per username.
    pub shown_cards: BTreeMap<String, String>,
}

impl HandSummary {
    /// Parse every line after the summary marker. Without a marker the
    /// summary is empty.
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut summary = HandSummary::default();
        let mut in_summary = false;

        for line in lines {
            let line = line.trim();
            if line.starts_with(SUMMARY_MARKER) {
                in_summary = true;
                continue;
            }
            if !in_summary {
                continue;
            }

            if let Some(caps) = SUMMARY_POT.captures(line) {
                let amount = |idx| {
                    caps.get(idx)
                        .and_then(|m| parse_amount(m.as_str()).ok())
                        .unwrap_or_default()
                };
                summary.total_pot = amount(1);
                summary.rake = amount(2);
            } else if let Some(board) = BOARD.captures(line).and_then(|c| c.get(1)) {
                summary.set_board(board.as_str());
            } else if let Some((name, outcome)) = parse_seat_outcome(line) {
                summary.apply(name, outcome);
            }
        }
        summary
    }

    fn set_board(&mut self, board: &str) {
        let cards: Vec<&str> = board.split_whitespace().collect();
        if cards.len() >= 3 {
            self.board_flop = Some(cards[..3].join(" "));
        }
        self.board_turn = cards.get(3).map(|c| c.to_string());
        self.board_river = cards.get(4).map(|c| c.to_string());
    }

    fn apply(&mut self, name: &str, outcome: SeatOutcome) {
        match outcome {
            SeatOutcome::Showed { cards, won } => {
                if let Some(amount) = won {
                    *self.collected.entry(name.to_string()).or_default() += amount;
                }
                self.shown_cards.insert(name.to_string(), cards);
            }
            SeatOutcome::Mucked { cards } => {
                self.shown_cards.insert(name.to_string(), cards);
            }
            SeatOutcome::Collected { amount } => {
                *self.collected.entry(name.to_string()).or_default() += amount;
            }
            SeatOutcome::Folded => {}
        }
    }
}

/// Match one summary seat line against the four outcome shapes. The
/// returned username has its role annotations removed.
pub fn parse_seat_outcome(line: &str) -> Option<(&str, SeatOutcome)> {
    if let Some(caps) = SUMMARY_SHOWED.captures(line) {
        let name = strip_annotations(caps.get(1)?.as_str());
        let cards = caps.get(2)?.as_str().to_string();
        let won = match caps.get(3).map(|m| m.as_str()) {
            Some("won") => caps.get(4).and_then(|m| parse_amount(m.as_str()).ok()),
            _ => None,
        };
        return Some((name, SeatOutcome::Showed { cards, won }));
    }
    if let Some(caps) = SUMMARY_MUCKED.captures(line) {
        let name = strip_annotations(caps.get(1)?.as_str());
        let cards = caps.get(2)?.as_str().to_string();
        return Some((name, SeatOutcome::Mucked { cards }));
    }
    if let Some(caps) = SUMMARY_COLLECTED.captures(line) {
        let name = strip_annotations(caps.get(1)?.as_str());
        let amount = parse_amount(caps.get(2)?.as_str()).ok()?;
        return Some((name, SeatOutcome::Collected { amount }));
    }
    if let Some(caps) = SUMMARY_FOLDED.captures(line) {
        let name = strip_annotations(caps.get(1)?.as_str());
        return Some((name, SeatOutcome::Folded));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_lines_before_marker_are_ignored() {
        let summary = HandSummary::parse([
            "Seat 1: a (100 in chips)",
            "a collected 10 from pot",
            "*** FLOP *** [2c 3d 4h]",
        ]);
        assert_eq!(HandSummary::default(), summary);
    }

    #[test]
    fn test_full_summary() {
        let summary = HandSummary::parse([
            "*** SUMMARY ***",
            "Total pot $12.40 | Rake $0.55",
            "Board [Ah Kd 2c 7s Td]",
            "Seat 1: villainA (button) folded before Flop (didn't bet)",
            "Seat 2: villain B (small blind) showed [Qh Qd] and lost with a pair of Queens",
            "Seat 3: hero (big blind) showed [Ac Ad] and won ($11.85) with three of a kind, Aces",
            "Seat 4: mucker mucked [7h 2s]",
        ]);
        assert_eq!(d("12.40"), summary.total_pot);
        assert_eq!(d("0.55"), summary.rake);
        assert_eq!(Some("Ah Kd 2c".to_string()), summary.board_flop);
        assert_eq!(Some("7s".to_string()), summary.board_turn);
        assert_eq!(Some("Td".to_string()), summary.board_river);
        assert_eq!(Some(&d("11.85")), summary.collected.get("hero"));
        assert_eq!(1, summary.collected.len());
        assert_eq!(Some(&"Qh Qd".to_string()), summary.shown_cards.get("villain B"));
        assert_eq!(Some(&"7h 2s".to_string()), summary.shown_cards.get("mucker"));
        assert!(!summary.shown_cards.contains_key("villainA"));
    }

    #[test]
    fn test_short_board() {
        let summary = HandSummary::parse(["*** SUMMARY ***", "Board [Ah Kd 2c]"]);
        assert_eq!(Some("Ah Kd 2c".to_string()), summary.board_flop);
        assert_eq!(None, summary.board_turn);
        assert_eq!(None, summary.board_river);
    }

    #[test]
    fn test_split_pot_collections_add_up() {
        let summary = HandSummary::parse([
            "*** SUMMARY ***",
            "Total pot 3000 Main pot 2000. Side pot 1000. | Rake 0",
            "Seat 1: a (button) collected (1000)",
            "Seat 1: a (button) collected (500)",
        ]);
        assert_eq!(d("3000"), summary.total_pot);
        assert_eq!(Some(&d("1500")), summary.collected.get("a"));
    }

    #[test]
    fn test_seat_outcome_shapes() {
        assert_eq!(
            Some(("a", SeatOutcome::Folded)),
            parse_seat_outcome("Seat 5: a (big blind) folded on the Turn")
        );
        assert_eq!(
            Some(("b", SeatOutcome::Collected { amount: d("300") })),
            parse_seat_outcome("Seat 6: b (small blind) collected (300)")
        );
        assert_eq!(None, parse_seat_outcome("Total pot 300 | Rake 0"));
    }
}

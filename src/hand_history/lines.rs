//! Recognizes the shape of every line inside a hand block.
//!
//! The classifier only knows about text. It pulls out names, cards and
//! amounts but keeps no state, all the accounting happens in the betting
//! state machine.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::core::{parse_amount, Street};

/// Builds a regex from a constant pattern. A typo here is a programming
/// error so a panic is the right thing.
fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hand history pattern should compile")
}

pub(crate) static CASH_HEADER: Lazy<Regex> = Lazy::new(|| {
    re(concat!(
        r"PokerStars Hand #(\d+):\s+Hold'em No Limit",
        r" \(([$€]?)([\d.,]+)/[$€]?([\d.,]+)(?:\s+([A-Z]{3}))?\)",
        r" - (\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2})",
    ))
});

pub(crate) static TOURNAMENT_HEADER: Lazy<Regex> = Lazy::new(|| {
    re(concat!(
        r"PokerStars Hand #(\d+): Tournament #(\d+), ([\d+]+) Hold'em No Limit",
        r" - (Level [IVXLC]+) \(([\d,]+)/([\d,]+)\)",
        r" - (\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2})",
    ))
});

pub(crate) static TABLE: Lazy<Regex> =
    Lazy::new(|| re(r"^Table '(.+?)' (\d+)-max.*Seat #(\d+) is the button"));

pub(crate) static SEAT: Lazy<Regex> =
    Lazy::new(|| re(r"^Seat (\d+): (.+?) \([$€]?([\d.,]+) in chips[^)]*\)(.*)"));

static POST_BLIND: Lazy<Regex> = Lazy::new(|| {
    re(r"^(.+?): posts (?:small blind|big blind|small & big blinds) [$€]?([\d.,]+)")
});
static POST_ANTE: Lazy<Regex> = Lazy::new(|| re(r"^(.+?): posts the ante [$€]?([\d.,]+)"));
static DEALT: Lazy<Regex> = Lazy::new(|| re(r"^Dealt to (.+?) \[(.+?)\]"));
static ACTION: Lazy<Regex> = Lazy::new(|| {
    re(concat!(
        r"^(.+?): (folds|checks|calls|bets|raises)",
        r"(?: [$€]?([\d.,]+))?(?: to [$€]?([\d.,]+))?",
    ))
});
static UNCALLED: Lazy<Regex> =
    Lazy::new(|| re(r"^Uncalled bet \([$€]?([\d.,]+)\) returned to (.+)"));
static COLLECTED: Lazy<Regex> = Lazy::new(|| {
    re(r"^(.+?) collected [$€]?([\d.,]+) from (?:pot|main pot|side pot(?:-\d+)?)")
});
static SHOWS: Lazy<Regex> = Lazy::new(|| re(r"^(.+?): shows \[(.+?)\]"));
static MUCKS: Lazy<Regex> = Lazy::new(|| re(r"^(.+?): mucks hand"));

static NOISE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^.+ is disconnected",
        r"^.+ is connected",
        r"^.+ has timed out(?: while disconnected| while being disconnected)?$",
        r"^.+ has returned",
        r"^.+ leaves the table",
        r"^.+ joins the table at seat #\d+",
        r"^.+ will be allowed to play after the button",
        r"^.+ was removed from the table",
        r"^.+ is sitting out",
        r"^.+:? sits out$",
        r"^.+ out of hand \(",
        r"^.+: doesn't show hand",
        r"^.+ said, ",
        r"^\*\*\*",
    ]
    .into_iter()
    .map(re)
    .collect()
});

pub(crate) static SUMMARY_POT: Lazy<Regex> =
    Lazy::new(|| re(r"Total pot [$€]?([\d.,]+).*\| Rake [$€]?([\d.,]+)"));
pub(crate) static BOARD: Lazy<Regex> = Lazy::new(|| re(r"Board \[(.+?)\]"));
pub(crate) static SUMMARY_SHOWED: Lazy<Regex> = Lazy::new(|| {
    re(r"^Seat \d+: (.+?) showed \[(.+?)\] and (won|lost)(?: \([$€]?([\d.,]+)\))?")
});
pub(crate) static SUMMARY_MUCKED: Lazy<Regex> =
    Lazy::new(|| re(r"^Seat \d+: (.+?) mucked \[(.+?)\]"));
pub(crate) static SUMMARY_COLLECTED: Lazy<Regex> =
    Lazy::new(|| re(r"^Seat \d+: (.+?) collected \([$€]?([\d.,]+)\)"));
pub(crate) static SUMMARY_FOLDED: Lazy<Regex> =
    Lazy::new(|| re(r"^Seat \d+: (.+?) (?:folded|didn't)"));

/// Trailing seat annotations that mean the player isn't in the hand.
pub(crate) const SITTING_OUT_MARKERS: [&str; 2] = ["sitting out", "out of hand"];

/// The literal that starts the summary section.
pub(crate) const SUMMARY_MARKER: &str = "*** SUMMARY ***";

/// Literal street markers and the street they start.
const STREET_MARKERS: [(&str, Street); 5] = [
    ("*** HOLE CARDS ***", Street::Preflop),
    ("*** FLOP ***", Street::Flop),
    ("*** TURN ***", Street::Turn),
    ("*** RIVER ***", Street::River),
    ("*** SHOW DOWN ***", Street::Showdown),
];

/// A marker line that moves the hand forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Street(Street),
    Summary,
}

/// What a single body line says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BodyLine<'a> {
    Marker(Marker),
    Noise,
    Dealt { player: &'a str, cards: &'a str },
    Uncalled { player: &'a str, amount: Decimal },
    Collected { player: &'a str },
    Shows { player: &'a str, cards: &'a str },
    Mucks { player: &'a str },
    PostAnte { player: &'a str, amount: Decimal },
    PostBlind { player: &'a str, amount: Decimal },
    Fold { player: &'a str },
    Check { player: &'a str },
    Call { player: &'a str, amount: Decimal, all_in: bool },
    Bet { player: &'a str, amount: Decimal, all_in: bool },
    Raise { player: &'a str, to: Decimal, all_in: bool },
    /// Seat declarations are handled by the seat parser.
    Seat,
    Unrecognized,
}

pub(crate) fn marker(line: &str) -> Option<Marker> {
    if line.starts_with(SUMMARY_MARKER) {
        return Some(Marker::Summary);
    }
    STREET_MARKERS
        .iter()
        .find(|(literal, _)| line.starts_with(literal))
        .map(|(_, street)| Marker::Street(*street))
}

pub(crate) fn is_noise(line: &str) -> bool {
    NOISE.iter().any(|pattern| pattern.is_match(line))
}

fn amount(raw: Option<regex::Match<'_>>) -> Option<Decimal> {
    raw.and_then(|m| parse_amount(m.as_str()).ok())
}

/// Classify one trimmed body line.
///
/// Lines whose amounts don't parse are reported as unrecognized rather than
/// guessed at.
pub(crate) fn classify(line: &str) -> BodyLine<'_> {
    if let Some(m) = marker(line) {
        return BodyLine::Marker(m);
    }
    if is_noise(line) {
        return BodyLine::Noise;
    }
    if let Some(caps) = DEALT.captures(line) {
        let (Some(player), Some(cards)) = (caps.get(1), caps.get(2)) else {
            return BodyLine::Unrecognized;
        };
        return BodyLine::Dealt {
            player: player.as_str().trim(),
            cards: cards.as_str(),
        };
    }
    if let Some(caps) = UNCALLED.captures(line) {
        return match (amount(caps.get(1)), caps.get(2)) {
            (Some(amount), Some(player)) => BodyLine::Uncalled {
                player: player.as_str().trim(),
                amount,
            },
            _ => BodyLine::Unrecognized,
        };
    }
    if let Some(player) = COLLECTED.captures(line).and_then(|c| c.get(1)) {
        return BodyLine::Collected {
            player: player.as_str().trim(),
        };
    }
    if let Some(caps) = SHOWS.captures(line) {
        if let (Some(player), Some(cards)) = (caps.get(1), caps.get(2)) {
            return BodyLine::Shows {
                player: player.as_str().trim(),
                cards: cards.as_str(),
            };
        }
    }
    if let Some(player) = MUCKS.captures(line).and_then(|c| c.get(1)) {
        return BodyLine::Mucks {
            player: player.as_str().trim(),
        };
    }
    if let Some(caps) = POST_ANTE.captures(line) {
        return match (caps.get(1), amount(caps.get(2))) {
            (Some(player), Some(amount)) => BodyLine::PostAnte {
                player: player.as_str().trim(),
                amount,
            },
            _ => BodyLine::Unrecognized,
        };
    }
    if let Some(caps) = POST_BLIND.captures(line) {
        return match (caps.get(1), amount(caps.get(2))) {
            (Some(player), Some(amount)) => BodyLine::PostBlind {
                player: player.as_str().trim(),
                amount,
            },
            _ => BodyLine::Unrecognized,
        };
    }
    if let Some(caps) = ACTION.captures(line) {
        return classify_action(line, &caps);
    }
    if SEAT.is_match(line) {
        return BodyLine::Seat;
    }
    BodyLine::Unrecognized
}

fn classify_action<'a>(line: &'a str, caps: &regex::Captures<'a>) -> BodyLine<'a> {
    let (Some(player), Some(verb)) = (caps.get(1), caps.get(2)) else {
        return BodyLine::Unrecognized;
    };
    let player = player.as_str().trim();
    let first = amount(caps.get(3));
    let to = amount(caps.get(4));
    let all_in = line.contains("and is all-in");

    match (verb.as_str(), first, to) {
        ("folds", _, _) => BodyLine::Fold { player },
        ("checks", _, _) => BodyLine::Check { player },
        ("calls", Some(amount), _) => BodyLine::Call {
            player,
            amount,
            all_in,
        },
        ("bets", Some(amount), _) => BodyLine::Bet {
            player,
            amount,
            all_in,
        },
        // "raises X to Y" carries the total in Y. Fall back to X if the "to"
        // is missing.
        ("raises", _, Some(to)) | ("raises", Some(to), None) => BodyLine::Raise {
            player,
            to,
            all_in,
        },
        _ => BodyLine::Unrecognized,
    }
}

/// Remove trailing parenthetical role annotations such as `(button)` or
/// `(small blind)` from a summary username.
pub(crate) fn strip_annotations(name: &str) -> &str {
    let mut name = name.trim();
    while name.ends_with(')') {
        match name.rfind(" (") {
            Some(idx) => name = name[..idx].trim_end(),
            None => break,
        }
    }
    name
}

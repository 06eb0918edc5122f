use chrono::NaiveDateTime;
use regex::Captures;
use rust_decimal::Decimal;

use crate::core::parse_amount;

use super::errors::HandParseError;
use super::lines::{CASH_HEADER, TABLE, TOURNAMENT_HEADER};
use super::model::SessionMeta;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// What the first two lines of a hand block say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandHeader {
    /// Ante is zero here. The betting state machine fills it in from the
    /// first ante post.
    pub session: SessionMeta,
    pub hand_id: String,
    pub timestamp: NaiveDateTime,
    pub button_seat: usize,
}

/// The part of the hand line that differs between cash games and
/// tournaments.
struct GameLine {
    hand_id: String,
    small_blind: Decimal,
    big_blind: Decimal,
    timestamp: NaiveDateTime,
    currency: String,
    tournament: Option<TournamentInfo>,
}

struct TournamentInfo {
    id: String,
    level: String,
    buy_in: String,
}

/// Parse the hand line and the table line of a block.
///
/// Exactly one of the cash game or tournament grammars has to match the hand
/// line, and the table line has to name the table, the seat count and the
/// button. Anything else is fatal for the block.
pub fn parse_header(hand_line: &str, table_line: &str) -> Result<HandHeader, HandParseError> {
    let game = parse_tournament_line(hand_line)
        .or_else(|| parse_cash_line(hand_line))
        .ok_or_else(|| HandParseError::HeaderParse {
            line: hand_line.to_string(),
        })??;

    let table_error = || HandParseError::TableParse {
        line: table_line.to_string(),
    };
    let caps = TABLE.captures(table_line.trim()).ok_or_else(table_error)?;
    let table_name = caps.get(1).ok_or_else(table_error)?.as_str().to_string();
    let max_seats = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .ok_or_else(table_error)?;
    let button_seat = caps
        .get(3)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .ok_or_else(table_error)?;

    let (is_tournament, tournament_id, tournament_level, tournament_buy_in) = match game.tournament
    {
        Some(t) => (true, Some(t.id), Some(t.level), Some(t.buy_in)),
        None => (false, None, None, None),
    };

    Ok(HandHeader {
        session: SessionMeta {
            table_name,
            game_type: "NLHE".to_string(),
            limit_type: "NL".to_string(),
            small_blind: game.small_blind,
            big_blind: game.big_blind,
            ante: Decimal::ZERO,
            max_seats,
            is_tournament,
            tournament_id,
            tournament_level,
            tournament_buy_in,
            currency: game.currency,
        },
        hand_id: game.hand_id,
        timestamp: game.timestamp,
        button_seat,
    })
}

fn parse_cash_line(line: &str) -> Option<Result<GameLine, HandParseError>> {
    CASH_HEADER.captures(line).map(|caps| cash_game(&caps))
}

fn parse_tournament_line(line: &str) -> Option<Result<GameLine, HandParseError>> {
    TOURNAMENT_HEADER
        .captures(line)
        .map(|caps| tournament_game(&caps))
}

fn group<'a>(caps: &Captures<'a>, idx: usize) -> &'a str {
    caps.get(idx).map(|m| m.as_str()).unwrap_or_default()
}

fn cash_game(caps: &Captures<'_>) -> Result<GameLine, HandParseError> {
    Ok(GameLine {
        hand_id: group(caps, 1).to_string(),
        small_blind: blind(group(caps, 3))?,
        big_blind: blind(group(caps, 4))?,
        timestamp: timestamp(group(caps, 6))?,
        currency: currency_code(group(caps, 2), caps.get(5).map(|m| m.as_str())),
        tournament: None,
    })
}

fn tournament_game(caps: &Captures<'_>) -> Result<GameLine, HandParseError> {
    Ok(GameLine {
        hand_id: group(caps, 1).to_string(),
        small_blind: blind(group(caps, 5))?,
        big_blind: blind(group(caps, 6))?,
        timestamp: timestamp(group(caps, 7))?,
        currency: "PLAY".to_string(),
        tournament: Some(TournamentInfo {
            id: group(caps, 2).to_string(),
            level: group(caps, 4).to_string(),
            buy_in: group(caps, 3).to_string(),
        }),
    })
}

fn blind(raw: &str) -> Result<Decimal, HandParseError> {
    parse_amount(raw).map_err(|_| HandParseError::InvalidAmount {
        value: raw.to_string(),
    })
}

fn timestamp(raw: &str) -> Result<NaiveDateTime, HandParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|_| {
        HandParseError::InvalidTimestamp {
            value: raw.to_string(),
        }
    })
}

/// An explicit currency suffix wins over the symbol in front of the blinds.
/// No currency at all means play money.
fn currency_code(symbol: &str, suffix: Option<&str>) -> String {
    match (suffix, symbol) {
        (Some(code), _) => code.to_string(),
        (None, "$") => "USD".to_string(),
        (None, "€") => "EUR".to_string(),
        _ => "PLAY".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    const CASH_LINE: &str = "PokerStars Hand #259603207505:  Hold'em No Limit (100/200) - 2026/02/05 18:41:05 CET [2026/02/05 12:41:05 ET]";
    const TABLE_LINE: &str = "Table 'Vigdis' 9-max (Play Money) Seat #3 is the button";
    const TOURNAMENT_LINE: &str = "PokerStars Hand #259603300001: Tournament #3970436932, 13200+1800 Hold'em No Limit - Level II (15/30) - 2026/02/05 19:02:44 CET [2026/02/05 13:02:44 ET]";

    #[test]
    fn test_cash_header() {
        let header = parse_header(CASH_LINE, TABLE_LINE).unwrap();
        assert_eq!("259603207505", header.hand_id);
        assert_eq!(3, header.button_seat);
        assert_eq!("Vigdis", header.session.table_name);
        assert_eq!(9, header.session.max_seats);
        assert_eq!(Decimal::new(100, 0), header.session.small_blind);
        assert_eq!(Decimal::new(200, 0), header.session.big_blind);
        assert_eq!(Decimal::ZERO, header.session.ante);
        assert!(!header.session.is_tournament);
        assert_eq!(None, header.session.tournament_id);
        assert_eq!("PLAY", header.session.currency);
        assert_eq!("NLHE", header.session.game_type);
        assert_eq!("NL", header.session.limit_type);

        let ts = header.timestamp;
        assert_eq!(
            (2026, 2, 5, 18, 41, 5),
            (
                ts.year(),
                ts.month(),
                ts.day(),
                ts.hour(),
                ts.minute(),
                ts.second()
            )
        );
    }

    #[test]
    fn test_cash_header_with_currency() {
        let line = "PokerStars Hand #1000: Hold'em No Limit ($0.05/$0.10 USD) - 2025/11/01 09:15:00 ET";
        let header = parse_header(line, "Table 'Hydra II' 6-max Seat #1 is the button").unwrap();
        assert_eq!("USD", header.session.currency);
        assert_eq!(Decimal::new(5, 2), header.session.small_blind);
        assert_eq!(Decimal::new(10, 2), header.session.big_blind);
        assert_eq!("Hydra II", header.session.table_name);
        assert_eq!(6, header.session.max_seats);

        let euro = "PokerStars Hand #1001: Hold'em No Limit (€0.02/€0.05) - 2025/11/01 09:15:00 CET";
        let header = parse_header(euro, "Table 'X' 6-max Seat #1 is the button").unwrap();
        assert_eq!("EUR", header.session.currency);
    }

    #[test]
    fn test_tournament_header() {
        let header = parse_header(TOURNAMENT_LINE, TABLE_LINE).unwrap();
        assert!(header.session.is_tournament);
        assert_eq!(Some("3970436932".to_string()), header.session.tournament_id);
        assert_eq!(Some("Level II".to_string()), header.session.tournament_level);
        assert_eq!(
            Some("13200+1800".to_string()),
            header.session.tournament_buy_in
        );
        assert_eq!(Decimal::new(15, 0), header.session.small_blind);
        assert_eq!(Decimal::new(30, 0), header.session.big_blind);
        assert_eq!("PLAY", header.session.currency);
        assert_eq!("259603300001", header.hand_id);
    }

    #[test]
    fn test_unknown_header_is_fatal() {
        let line = "PokerStars Hand #1: Omaha Pot Limit (1/2) - 2026/02/05 18:41:05 ET";
        assert_eq!(
            Err(HandParseError::HeaderParse {
                line: line.to_string()
            }),
            parse_header(line, TABLE_LINE)
        );
    }

    #[test]
    fn test_bad_table_line_is_fatal() {
        assert_eq!(
            Err(HandParseError::TableParse {
                line: "Table without a button".to_string()
            }),
            parse_header(CASH_LINE, "Table without a button")
        );
    }

    #[test]
    fn test_impossible_timestamp() {
        let line = "PokerStars Hand #1:  Hold'em No Limit (1/2) - 2026/13/45 18:41:05 ET";
        assert_eq!(
            Err(HandParseError::InvalidTimestamp {
                value: "2026/13/45 18:41:05".to_string()
            }),
            parse_header(line, TABLE_LINE)
        );
    }
}

use rust_decimal::Decimal;

use crate::core::parse_amount;

use super::lines::{SEAT, SITTING_OUT_MARKERS};

/// A player declared on a seat line before the cards are dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatInfo {
    pub username: String,
    pub seat: usize,
    pub starting_stack: Decimal,
    /// Filled in from the `Dealt to` line.
    pub hole_cards: Option<String>,
    pub sitting_out: bool,
}

/// The seated players of one hand, in the order they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatMap {
    seats: Vec<SeatInfo>,
}

impl SeatMap {
    /// Collect every line shaped like a seat declaration.
    ///
    /// Players who never show up on a seat line aren't part of the hand. A
    /// second declaration of the same username replaces the first.
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map = SeatMap::default();
        for line in lines {
            if let Some(info) = parse_seat_line(line) {
                map.insert(info);
            }
        }
        map
    }

    fn insert(&mut self, info: SeatInfo) {
        match self.seats.iter_mut().find(|s| s.username == info.username) {
            Some(existing) => *existing = info,
            None => self.seats.push(info),
        }
    }

    pub fn get(&self, username: &str) -> Option<&SeatInfo> {
        self.seats.iter().find(|s| s.username == username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.get(username).is_some()
    }

    pub fn set_hole_cards(&mut self, username: &str, cards: &str) {
        if let Some(seat) = self.seats.iter_mut().find(|s| s.username == username) {
            seat.hole_cards = Some(cards.to_string());
        }
    }

    pub fn seat_numbers(&self) -> Vec<usize> {
        self.seats.iter().map(|s| s.seat).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeatInfo> {
        self.seats.iter()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

fn parse_seat_line(line: &str) -> Option<SeatInfo> {
    let caps = SEAT.captures(line.trim())?;
    let seat = caps.get(1)?.as_str().parse::<usize>().ok()?;
    let username = caps.get(2)?.as_str().trim().to_string();
    let starting_stack = parse_amount(caps.get(3)?.as_str()).ok()?;
    let trailing = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
    let sitting_out = SITTING_OUT_MARKERS
        .iter()
        .any(|marker| trailing.contains(marker));

    Some(SeatInfo {
        username,
        seat,
        starting_stack,
        hole_cards: None,
        sitting_out,
    })
}

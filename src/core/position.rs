use std::fmt;
use std::str::FromStr;

use crate::core::errors::LedgerCoreError;

/// A seat's position relative to the button for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub enum Position {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    UnderTheGunPlusOne,
    Middle,
    MiddlePlusOne,
    Cutoff,
    Hijack,
    /// Fallback for table sizes outside of 2 through 9 players. The value is
    /// the offset from the button.
    Other(usize),
}

use Position::*;

const HEADS_UP: [Position; 2] = [Button, BigBlind];
const THREE_HANDED: [Position; 3] = [Button, SmallBlind, BigBlind];
const FOUR_HANDED: [Position; 4] = [Button, SmallBlind, BigBlind, UnderTheGun];
const FIVE_HANDED: [Position; 5] = [Button, SmallBlind, BigBlind, UnderTheGun, Cutoff];
const SIX_HANDED: [Position; 6] = [Button, SmallBlind, BigBlind, UnderTheGun, Middle, Cutoff];
const SEVEN_HANDED: [Position; 7] = [
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    Middle,
    MiddlePlusOne,
    Cutoff,
];
const EIGHT_HANDED: [Position; 8] = [
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    UnderTheGunPlusOne,
    Middle,
    MiddlePlusOne,
    Cutoff,
];
const NINE_HANDED: [Position; 9] = [
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    UnderTheGunPlusOne,
    Middle,
    MiddlePlusOne,
    Cutoff,
    Hijack,
];

impl Position {
    /// The label table for a given number of active seats, starting at the
    /// button and going clockwise. `None` when there's no table for that
    /// count.
    pub fn table_for(num_seats: usize) -> Option<&'static [Position]> {
        match num_seats {
            2 => Some(&HEADS_UP),
            3 => Some(&THREE_HANDED),
            4 => Some(&FOUR_HANDED),
            5 => Some(&FIVE_HANDED),
            6 => Some(&SIX_HANDED),
            7 => Some(&SEVEN_HANDED),
            8 => Some(&EIGHT_HANDED),
            9 => Some(&NINE_HANDED),
            _ => None,
        }
    }

    /// Label for the seat that is `offset` seats clockwise of the button on a
    /// table with `num_seats` active seats.
    pub fn from_button_offset(offset: usize, num_seats: usize) -> Position {
        Self::table_for(num_seats)
            .and_then(|table| table.get(offset).copied())
            .unwrap_or(Other(offset))
    }

    /// Assign a label to every seat number.
    ///
    /// Seat numbers are sorted, then rotated so that the button seat is
    /// first. If the button seat isn't in the list the lowest seat is treated
    /// as the button.
    pub fn assign(seats: &[usize], button_seat: usize) -> Vec<(usize, Position)> {
        let mut sorted = seats.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let button_idx = sorted.iter().position(|&s| s == button_seat).unwrap_or(0);
        let num_seats = sorted.len();
        sorted.rotate_left(button_idx.min(num_seats.saturating_sub(1)));

        sorted
            .into_iter()
            .enumerate()
            .map(|(offset, seat)| (seat, Self::from_button_offset(offset, num_seats)))
            .collect()
    }

    pub fn label(&self) -> String {
        match self {
            Button => "BTN".to_string(),
            SmallBlind => "SB".to_string(),
            BigBlind => "BB".to_string(),
            UnderTheGun => "UTG".to_string(),
            UnderTheGunPlusOne => "UTG+1".to_string(),
            Middle => "MP".to_string(),
            MiddlePlusOne => "MP+1".to_string(),
            Cutoff => "CO".to_string(),
            Hijack => "HJ".to_string(),
            Other(offset) => format!("P{offset}"),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Position {
    type Err = LedgerCoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BTN" => Ok(Button),
            "SB" => Ok(SmallBlind),
            "BB" => Ok(BigBlind),
            "UTG" => Ok(UnderTheGun),
            "UTG+1" => Ok(UnderTheGunPlusOne),
            "MP" => Ok(Middle),
            "MP+1" => Ok(MiddlePlusOne),
            "CO" => Ok(Cutoff),
            "HJ" => Ok(Hijack),
            other => other
                .strip_prefix('P')
                .and_then(|n| n.parse::<usize>().ok())
                .map(Other)
                .ok_or_else(|| LedgerCoreError::UnknownPosition(other.to_string())),
        }
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.label()
    }
}

impl TryFrom<String> for Position {
    type Error = LedgerCoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        for n in 2..=9 {
            let table = Position::table_for(n).unwrap();
            assert_eq!(n, table.len());
            assert_eq!(Button, table[0]);
        }
        assert!(Position::table_for(1).is_none());
        assert!(Position::table_for(10).is_none());
    }

    #[test]
    fn test_assign_rotates_to_button() {
        let assigned = Position::assign(&[1, 3, 5, 7, 8, 9], 5);
        assert_eq!(
            vec![
                (5, Button),
                (7, SmallBlind),
                (8, BigBlind),
                (9, UnderTheGun),
                (1, Middle),
                (3, Cutoff),
            ],
            assigned
        );
    }

    #[test]
    fn test_assign_heads_up() {
        let assigned = Position::assign(&[4, 2], 4);
        assert_eq!(vec![(4, Button), (2, BigBlind)], assigned);
    }

    #[test]
    fn test_assign_missing_button_uses_lowest_seat() {
        let assigned = Position::assign(&[2, 6, 4], 1);
        assert_eq!((2, Button), assigned[0]);
    }

    #[test]
    fn test_assign_nine_handed_has_secondary_labels() {
        let assigned = Position::assign(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 1);
        let labels: Vec<String> = assigned.iter().map(|(_, p)| p.label()).collect();
        assert_eq!(
            vec!["BTN", "SB", "BB", "UTG", "UTG+1", "MP", "MP+1", "CO", "HJ"],
            labels
        );
    }

    #[test]
    fn test_assign_empty() {
        assert!(Position::assign(&[], 1).is_empty());
    }

    #[test]
    fn test_label_round_trip() {
        for p in [Button, UnderTheGunPlusOne, MiddlePlusOne, Hijack, Other(11)] {
            assert_eq!(p, p.label().parse::<Position>().unwrap());
        }
        assert!("DEALER".parse::<Position>().is_err());
    }
}

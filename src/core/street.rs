use std::fmt;
use std::str::FromStr;

use crate::core::errors::LedgerCoreError;

/// A betting round of a hold'em hand, plus the showdown that follows the
/// river.
///
/// The ordering follows the order the streets are dealt in so `Street::Flop <
/// Street::River` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Street {
    /// Forced bets and the first betting round.
    #[default]
    Preflop,
    /// Three community cards are out.
    Flop,
    /// Fourth community card.
    Turn,
    /// Fifth and final community card.
    River,
    /// Hands are revealed. No more betting.
    Showdown,
}

impl Street {
    /// Returns true for the three streets that are played after community
    /// cards are dealt.
    pub fn is_postflop(&self) -> bool {
        matches!(self, Street::Flop | Street::Turn | Street::River)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Street::Preflop => "PREFLOP",
            Street::Flop => "FLOP",
            Street::Turn => "TURN",
            Street::River => "RIVER",
            Street::Showdown => "SHOWDOWN",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Street {
    type Err = LedgerCoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PREFLOP" => Ok(Street::Preflop),
            "FLOP" => Ok(Street::Flop),
            "TURN" => Ok(Street::Turn),
            "RIVER" => Ok(Street::River),
            "SHOWDOWN" => Ok(Street::Showdown),
            other => Err(LedgerCoreError::UnknownStreet(other.to_string())),
        }
    }
}

/// The kind of a recorded action, as it is stored and queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum ActionKind {
    PostBlind,
    PostAnte,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionKind {
    /// Blind and ante posts are forced and never count as a decision.
    pub fn is_forced(&self) -> bool {
        matches!(self, ActionKind::PostBlind | ActionKind::PostAnte)
    }

    /// Bets and raises.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::PostBlind => "POST_BLIND",
            ActionKind::PostAnte => "POST_ANTE",
            ActionKind::Fold => "FOLD",
            ActionKind::Check => "CHECK",
            ActionKind::Call => "CALL",
            ActionKind::Bet => "BET",
            ActionKind::Raise => "RAISE",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = LedgerCoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POST_BLIND" => Ok(ActionKind::PostBlind),
            "POST_ANTE" => Ok(ActionKind::PostAnte),
            "FOLD" => Ok(ActionKind::Fold),
            "CHECK" => Ok(ActionKind::Check),
            "CALL" => Ok(ActionKind::Call),
            "BET" => Ok(ActionKind::Bet),
            "RAISE" => Ok(ActionKind::Raise),
            other => Err(LedgerCoreError::UnknownActionKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_order() {
        assert!(Street::Preflop < Street::Flop);
        assert!(Street::Flop < Street::Turn);
        assert!(Street::River < Street::Showdown);
    }

    #[test]
    fn test_postflop_streets() {
        assert!(!Street::Preflop.is_postflop());
        assert!(Street::Flop.is_postflop());
        assert!(Street::Turn.is_postflop());
        assert!(Street::River.is_postflop());
        assert!(!Street::Showdown.is_postflop());
    }

    #[test]
    fn test_street_parse_display() {
        for street in [
            Street::Preflop,
            Street::Flop,
            Street::Turn,
            Street::River,
            Street::Showdown,
        ] {
            assert_eq!(street, street.to_string().parse::<Street>().unwrap());
        }
        assert_eq!(
            Err(LedgerCoreError::UnknownStreet("FIFTH".to_string())),
            "FIFTH".parse::<Street>()
        );
    }

    #[test]
    fn test_action_kind_parse() {
        assert_eq!(Ok(ActionKind::PostBlind), "POST_BLIND".parse());
        assert_eq!(Ok(ActionKind::Raise), "RAISE".parse());
        assert!("SHOVE".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_action_kind_flags() {
        assert!(ActionKind::PostAnte.is_forced());
        assert!(!ActionKind::Call.is_forced());
        assert!(ActionKind::Bet.is_aggressive());
        assert!(ActionKind::Raise.is_aggressive());
        assert!(!ActionKind::Call.is_aggressive());
    }
}

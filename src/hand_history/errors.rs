use thiserror::Error;

/// Reasons a whole hand block can't be turned into a [`ParsedHand`].
///
/// Any of these is fatal for the block. Unknown body lines are not errors,
/// they show up as warnings on the parsed hand instead.
///
/// [`ParsedHand`]: crate::hand_history::ParsedHand
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum HandParseError {
    #[error("Hand block is empty")]
    EmptyBlock,

    #[error("Cannot parse hand header: {line:?}")]
    HeaderParse { line: String },

    #[error("Cannot parse table line: {line:?}")]
    TableParse { line: String },

    #[error("Invalid timestamp: {value:?}")]
    InvalidTimestamp { value: String },

    #[error("Invalid amount: {value:?}")]
    InvalidAmount { value: String },
}

//! Vocabulary shared by the parser, the statistics and the store.

/// Errors for the core types.
mod errors;
/// Export `LedgerCoreError`
pub use self::errors::LedgerCoreError;

/// Streets and action kinds.
mod street;
/// Export `Street` and `ActionKind`
pub use self::street::{ActionKind, Street};

/// Seat positions relative to the button.
mod position;
/// Export `Position`
pub use self::position::Position;

/// Exact monetary arithmetic helpers.
mod money;
/// Export the amount helpers
pub use self::money::{floor_zero, parse_amount, MAX_AMOUNT_SCALE, MAX_AMOUNT_UNITS};

/// Re-export of the decimal type every amount is expressed in.
pub use rust_decimal::Decimal;

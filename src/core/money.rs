use rust_decimal::Decimal;

use crate::core::errors::LedgerCoreError;

/// Amounts at or above this many whole units are rejected.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;
/// Amounts with more decimal places than this are rejected.
pub const MAX_AMOUNT_SCALE: u32 = 8;

/// Parse a logged amount into an exact decimal.
///
/// A leading currency symbol and thousands separators are accepted, so
/// `"$1,250.50"` and `"1250.50"` parse to the same value. Amounts outside
/// `MAX_AMOUNT_UNITS` or with more than `MAX_AMOUNT_SCALE` decimal places
/// are errors, which keeps every sum a hand can produce from overflowing.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerCoreError> {
    let invalid = || LedgerCoreError::InvalidAmount(raw.to_string());
    let cleaned: String = raw
        .trim()
        .trim_start_matches(['$', '€'])
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let value = cleaned.parse::<Decimal>().map_err(|_| invalid())?;
    if value.abs() >= Decimal::from(MAX_AMOUNT_UNITS) || value.scale() > MAX_AMOUNT_SCALE {
        return Err(invalid());
    }
    Ok(value)
}

/// Clamp negative values to zero.
pub fn floor_zero(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

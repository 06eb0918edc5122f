use thiserror::Error;

/// Errors raised while converting the shared vocabulary types from text.
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum LedgerCoreError {
    #[error("Unknown street name: {0}")]
    UnknownStreet(String),
    #[error("Unknown action kind: {0}")]
    UnknownActionKind(String),
    #[error("Unknown position label: {0}")]
    UnknownPosition(String),
    #[error("Unable to parse a monetary amount from {0:?}")]
    InvalidAmount(String),
}

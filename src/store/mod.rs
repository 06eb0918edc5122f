//! Where finalized hands go after parsing.
//!
//! A [`HandStore`] gives every hand a durable [`HandId`], refuses hands whose
//! site hand id it has already seen, and returns each hand's actions in
//! sequence order for the statistics in [`crate::stats`].
use std::fmt;

use crate::hand_history::ParsedHand;
use crate::stats::HandActions;

mod errors;
mod memory;

#[cfg(feature = "serde")]
mod jsonl;

pub use errors::StoreError;
pub use memory::InMemoryHandStore;

#[cfg(feature = "serde")]
pub use jsonl::JsonLinesHandStore;

/// The identity a store assigns to a hand. Time ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HandId(uuid::Uuid);

impl HandId {
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for HandId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage for parsed hands.
pub trait HandStore {
    /// Store one hand as a unit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] when a hand with the same site hand
    /// id is already stored. Nothing already stored is changed.
    fn insert(&mut self, hand: &ParsedHand) -> Result<HandId, StoreError>;

    /// Whether a hand with this site hand id is stored.
    fn contains(&self, hand_id: &str) -> bool;

    /// Number of stored hands.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored hand in insertion order.
    fn hands(&self) -> Vec<&ParsedHand>;

    /// Every stored hand's actions, ordered by sequence, in insertion order.
    fn hand_actions(&self) -> Vec<HandActions> {
        self.hands().into_iter().map(HandActions::from).collect()
    }
}

use std::collections::HashMap;

use tracing::trace;

use crate::hand_history::ParsedHand;

use super::{HandId, HandStore, StoreError};

/// A store that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHandStore {
    hands: Vec<(HandId, ParsedHand)>,
    by_hand_id: HashMap<String, usize>,
}

impl InMemoryHandStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hand_id: &str) -> Option<(HandId, &ParsedHand)> {
        self.by_hand_id
            .get(hand_id)
            .and_then(|&idx| self.hands.get(idx))
            .map(|(id, hand)| (*id, hand))
    }

    /// Add a hand under an id assigned earlier.
    pub(crate) fn insert_with_id(
        &mut self,
        id: HandId,
        hand: ParsedHand,
    ) -> Result<HandId, StoreError> {
        if self.by_hand_id.contains_key(&hand.hand.hand_id) {
            return Err(StoreError::Duplicate {
                hand_id: hand.hand.hand_id,
            });
        }
        trace!(%id, hand_id = %hand.hand.hand_id, "Storing hand");
        self.by_hand_id
            .insert(hand.hand.hand_id.clone(), self.hands.len());
        self.hands.push((id, hand));
        Ok(id)
    }
}

impl HandStore for InMemoryHandStore {
    fn insert(&mut self, hand: &ParsedHand) -> Result<HandId, StoreError> {
        self.insert_with_id(HandId::new(), hand.clone())
    }

    fn contains(&self, hand_id: &str) -> bool {
        self.by_hand_id.contains_key(hand_id)
    }

    fn len(&self) -> usize {
        self.hands.len()
    }

    fn hands(&self) -> Vec<&ParsedHand> {
        self.hands.iter().map(|(_, hand)| hand).collect()
    }
}

use thiserror::Error;

/// Reasons a hand couldn't be stored.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The hand is already in the store. This is a skip, not a failure.
    #[error("Hand {hand_id} is already stored")]
    Duplicate { hand_id: String },

    #[error("Store IO error")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Unable to serialize or deserialize a stored hand")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}

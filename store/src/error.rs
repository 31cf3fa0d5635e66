use marketgate_types::SellerId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("version conflict for {seller}: expected {expected}, found {found}")]
    VersionConflict {
        seller: SellerId,
        expected: u64,
        found: u64,
    },

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether retrying the same call later may succeed without user action.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

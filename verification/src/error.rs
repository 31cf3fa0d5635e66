use marketgate_store::StoreError;
use marketgate_types::{SellerId, VerificationStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("verification record for {0} does not exist")]
    NotFound(SellerId),

    #[error("{actor} cannot move a verification from {from} to {to}")]
    InvalidTransition {
        actor: crate::Actor,
        from: VerificationStatus,
        to: VerificationStatus,
    },

    #[error("only the final onboarding submission may set status or completion for {0}")]
    NotASubmission(SellerId),

    #[error("verification for {seller} changed concurrently (expected version {expected}, found {found})")]
    Conflict {
        seller: SellerId,
        expected: u64,
        found: u64,
    },

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("storage task failed: {0}")]
    TaskFailed(String),
}

impl VerificationError {
    /// Whether the same call may succeed if simply repeated.
    ///
    /// Conflicts are not retryable: the caller has to reload first.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_transient(),
            Self::TaskFailed(_) => true,
            _ => false,
        }
    }
}

impl From<StoreError> for VerificationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::VersionConflict {
                seller,
                expected,
                found,
            } => Self::Conflict {
                seller,
                expected,
                found,
            },
            other => Self::Store(other),
        }
    }
}

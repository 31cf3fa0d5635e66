use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] marketgate_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] marketgate_store_lmdb::LmdbError),

    #[error("verification error: {0}")]
    Verification(#[from] marketgate_verification::VerificationError),

    #[error("onboarding error: {0}")]
    Wizard(#[from] marketgate_onboarding::WizardError),

    #[error("only sellers have a verification record")]
    NotSeller,
}

impl PortalError {
    /// Whether the UI should offer a plain retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_transient(),
            Self::Verification(e) => e.is_retryable(),
            Self::Wizard(e) => e.is_retryable(),
            _ => false,
        }
    }
}

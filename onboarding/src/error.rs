use marketgate_store::StoreError;
use marketgate_types::Role;
use marketgate_verification::VerificationError;
use thiserror::Error;

use crate::{Field, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("only sellers can onboard, session role is {0}")]
    NotSeller(Role),

    #[error("{step} is missing required fields: {missing:?}")]
    Validation { step: WizardStep, missing: Vec<Field> },

    #[error("a save is already in progress")]
    SaveInFlight,

    #[error("action belongs to {expected}, but the wizard is on {actual}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    #[error("cannot go back from {from} to {to}")]
    InvalidBackTarget { from: WizardStep, to: WizardStep },

    #[error("could not save onboarding progress: {0}")]
    Persistence(#[from] VerificationError),

    #[error("could not save profile: {0}")]
    Profile(StoreError),

    #[error("storage task failed: {0}")]
    TaskFailed(String),
}

impl WizardError {
    /// Whether the seller can simply press the same button again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Persistence(e) => e.is_retryable(),
            Self::Profile(e) => e.is_transient(),
            Self::TaskFailed(_) => true,
            _ => false,
        }
    }

    /// Whether the wizard has to reload the record before retrying.
    pub fn needs_reload(&self) -> bool {
        matches!(self, Self::Persistence(VerificationError::Conflict { .. }))
    }
}

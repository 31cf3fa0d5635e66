//! The persisted onboarding progress marker.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// Index of the last onboarding step that was successfully persisted.
///
/// `0` means nothing has been saved yet, `4` means the profile was submitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CompletionStep(u8);

impl CompletionStep {
    pub const NONE: Self = Self(0);
    pub const SUBMITTED: Self = Self(4);
    pub const MAX: u8 = 4;

    pub fn new(step: u8) -> Result<Self, TypesError> {
        if step > Self::MAX {
            return Err(TypesError::StepOutOfRange(step));
        }
        Ok(Self(step))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// The step a returning seller lands on: one past the last saved step,
    /// capped at the final step.
    pub fn resume_step(&self) -> u8 {
        (self.0 + 1).min(Self::MAX)
    }

    /// Merge a newly reached step into the persisted marker without ever
    /// moving it backwards.
    pub fn advanced_to(self, reached: CompletionStep) -> Self {
        self.max(reached)
    }

    pub fn is_submitted(&self) -> bool {
        self.0 == Self::MAX
    }
}

impl TryFrom<u8> for CompletionStep {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompletionStep> for u8 {
    fn from(step: CompletionStep) -> Self {
        step.0
    }
}

impl fmt::Display for CompletionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(CompletionStep::new(5), Err(TypesError::StepOutOfRange(5)));
        assert!(serde_json::from_str::<CompletionStep>("7").is_err());
    }

    #[test]
    fn resume_is_capped_at_final_step() {
        assert_eq!(CompletionStep::NONE.resume_step(), 1);
        assert_eq!(CompletionStep::new(3).unwrap().resume_step(), 4);
        assert_eq!(CompletionStep::SUBMITTED.resume_step(), 4);
    }
}

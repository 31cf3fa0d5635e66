//! The ordered onboarding steps.

use serde::{Deserialize, Serialize};
use std::fmt;

use marketgate_types::CompletionStep;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    PersonalInfo,
    StoreDetails,
    Policies,
    ReviewSubmit,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::PersonalInfo,
        WizardStep::StoreDetails,
        WizardStep::Policies,
        WizardStep::ReviewSubmit,
    ];

    /// 1-based position, matching the persisted completion marker.
    pub fn index(&self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::StoreDetails => 2,
            Self::Policies => 3,
            Self::ReviewSubmit => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::PersonalInfo),
            2 => Some(Self::StoreDetails),
            3 => Some(Self::Policies),
            4 => Some(Self::ReviewSubmit),
            _ => None,
        }
    }

    /// The step a seller lands on after a reload.
    pub fn resume_from(persisted: CompletionStep) -> Self {
        // resume_step is always within 1..=4
        Self::from_index(persisted.resume_step()).unwrap_or(Self::ReviewSubmit)
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The completion marker written once this step is saved.
    pub fn completion(&self) -> CompletionStep {
        CompletionStep::new(self.index()).unwrap_or(CompletionStep::SUBMITTED)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal information",
            Self::StoreDetails => "Store details",
            Self::Policies => "Policies",
            Self::ReviewSubmit => "Review & submit",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
        assert_eq!(WizardStep::from_index(0), None);
        assert_eq!(WizardStep::from_index(5), None);
    }

    #[test]
    fn review_is_last() {
        assert_eq!(WizardStep::Policies.next(), Some(WizardStep::ReviewSubmit));
        assert_eq!(WizardStep::ReviewSubmit.next(), None);
    }
}

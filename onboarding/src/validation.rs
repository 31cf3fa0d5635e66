//! Per-step required-field checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{WizardDraft, WizardError, WizardStep};

/// A form field that can be reported missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    FullName,
    Phone,
    BusinessName,
    BusinessType,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FullName => "full name",
            Self::Phone => "phone",
            Self::BusinessName => "business name",
            Self::BusinessType => "business type",
        };
        f.write_str(name)
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Required fields of `step` that are still blank in `draft`.
pub fn missing_fields(step: WizardStep, draft: &WizardDraft) -> Vec<Field> {
    let mut missing = Vec::new();
    match step {
        WizardStep::PersonalInfo => {
            if blank(&draft.personal.full_name) {
                missing.push(Field::FullName);
            }
            if blank(&draft.personal.phone) {
                missing.push(Field::Phone);
            }
        }
        WizardStep::StoreDetails => {
            if blank(&draft.store.business_name) {
                missing.push(Field::BusinessName);
            }
            if blank(&draft.store.business_type) {
                missing.push(Field::BusinessType);
            }
        }
        WizardStep::Policies | WizardStep::ReviewSubmit => {}
    }
    missing
}

/// Validate only the fields `step` requires.
pub fn validate_step(step: WizardStep, draft: &WizardDraft) -> Result<(), WizardError> {
    let missing = missing_fields(step, draft);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(WizardError::Validation { step, missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PersonalInfo, StepData};

    #[test]
    fn personal_info_needs_name_and_phone() {
        let draft = WizardDraft::default();
        assert_eq!(
            missing_fields(WizardStep::PersonalInfo, &draft),
            vec![Field::FullName, Field::Phone]
        );
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let mut draft = WizardDraft::default();
        draft.apply(StepData::Personal(PersonalInfo {
            full_name: "  ".into(),
            phone: "555".into(),
            avatar_url: None,
        }));
        assert_eq!(
            missing_fields(WizardStep::PersonalInfo, &draft),
            vec![Field::FullName]
        );
    }

    #[test]
    fn store_details_ignores_other_steps() {
        let mut draft = WizardDraft::default();
        draft.store.business_name = "Kiln".into();
        draft.store.business_type = "ceramics".into();
        // Step 1 is blank, but only step 2 is checked here.
        assert!(validate_step(WizardStep::StoreDetails, &draft).is_ok());
    }

    #[test]
    fn policies_have_no_required_fields() {
        assert!(validate_step(WizardStep::Policies, &WizardDraft::default()).is_ok());
    }
}

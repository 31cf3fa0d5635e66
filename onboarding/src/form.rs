//! Wizard form state.
//!
//! Each step owns one typed section of the draft. Edits arrive as a
//! [`StepData`] and replace that section wholesale; what gets persisted at a
//! transition is derived from the draft by [`WizardDraft::patch_through`]
//! and, at the end, [`ReviewPayload::into_patch`].

use serde::{Deserialize, Serialize};

use marketgate_store::{PostalAddress, Profile, SellerVerification, VerificationPatch};
use marketgate_types::{CompletionStep, VerificationStatus};
use marketgate_verification::lifecycle;

use crate::WizardStep;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub phone: String,
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDetails {
    pub business_name: String,
    pub business_type: String,
    pub business_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub street: String,
    pub store_logo: Option<String>,
    pub store_banner: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policies {
    pub return_policy: String,
    pub shipping_policy: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewChoices {
    pub store_visible: bool,
}

/// One step's worth of form input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepData {
    Personal(PersonalInfo),
    Store(StoreDetails),
    Policies(Policies),
    Review(ReviewChoices),
}

impl StepData {
    pub fn step(&self) -> WizardStep {
        match self {
            Self::Personal(_) => WizardStep::PersonalInfo,
            Self::Store(_) => WizardStep::StoreDetails,
            Self::Policies(_) => WizardStep::Policies,
            Self::Review(_) => WizardStep::ReviewSubmit,
        }
    }
}

/// Everything the seller has entered so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDraft {
    pub personal: PersonalInfo,
    pub store: StoreDetails,
    pub policies: Policies,
    pub review: ReviewChoices,
}

impl WizardDraft {
    /// Pre-fill the sections of every confirmed step from persisted values.
    /// Sections past the completion marker start empty.
    pub fn from_persisted(record: &SellerVerification, profile: Option<&Profile>) -> Self {
        let confirmed = record.completion_step.get();
        let mut draft = Self::default();

        if confirmed >= WizardStep::PersonalInfo.index() {
            draft.personal = PersonalInfo {
                full_name: profile.map(|p| p.full_name.clone()).unwrap_or_default(),
                phone: record.phone.clone(),
                avatar_url: profile.and_then(|p| p.avatar_url.clone()),
            };
        }
        if confirmed >= WizardStep::StoreDetails.index() {
            draft.store = StoreDetails {
                business_name: record.business_name.clone(),
                business_type: record.business_type.clone(),
                business_description: record.business_description.clone(),
                contact_email: record.contact_email.clone(),
                contact_phone: record.contact_phone.clone(),
                street: record.address.street.clone(),
                store_logo: record.store_logo.clone(),
                store_banner: record.store_banner.clone(),
            };
        }
        if confirmed >= WizardStep::Policies.index() {
            draft.policies = Policies {
                return_policy: record.return_policy.clone(),
                shipping_policy: record.shipping_policy.clone(),
            };
        }
        if confirmed >= WizardStep::ReviewSubmit.index() {
            draft.review = ReviewChoices {
                store_visible: record.store_visible,
            };
        }
        draft
    }

    /// Replace the section a [`StepData`] belongs to.
    pub fn apply(&mut self, data: StepData) {
        match data {
            StepData::Personal(personal) => self.personal = personal,
            StepData::Store(store) => self.store = store,
            StepData::Policies(policies) => self.policies = policies,
            StepData::Review(review) => self.review = review,
        }
    }

    /// The write issued when the seller leaves `step` forwards: every section
    /// up to and including `step`, plus the completion marker for `step`.
    pub fn patch_through(&self, step: WizardStep) -> VerificationPatch {
        let mut patch = VerificationPatch {
            completion_step: Some(step.completion()),
            ..Default::default()
        };
        if step >= WizardStep::PersonalInfo {
            patch.phone = Some(self.personal.phone.clone());
        }
        if step >= WizardStep::StoreDetails {
            self.store.write_into(&mut patch);
        }
        if step >= WizardStep::Policies {
            self.policies.write_into(&mut patch);
        }
        patch
    }

    /// Merge all sections into the final submission.
    pub fn review_payload(&self) -> ReviewPayload {
        ReviewPayload {
            personal: self.personal.clone(),
            store: self.store.clone(),
            policies: self.policies.clone(),
            review: self.review.clone(),
        }
    }
}

impl StoreDetails {
    fn write_into(&self, patch: &mut VerificationPatch) {
        patch.business_name = Some(self.business_name.clone());
        patch.business_type = Some(self.business_type.clone());
        patch.business_description = Some(self.business_description.clone());
        patch.contact_email = Some(self.contact_email.clone());
        patch.contact_phone = Some(self.contact_phone.clone());
        patch.address = Some(PostalAddress {
            street: self.street.clone(),
        });
        patch.store_logo = Some(self.store_logo.clone());
        patch.store_banner = Some(self.store_banner.clone());
    }
}

impl Policies {
    fn write_into(&self, patch: &mut VerificationPatch) {
        patch.return_policy = Some(self.return_policy.clone());
        patch.shipping_policy = Some(self.shipping_policy.clone());
    }
}

/// The complete profile as submitted from the last step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub personal: PersonalInfo,
    pub store: StoreDetails,
    pub policies: Policies,
    pub review: ReviewChoices,
}

impl ReviewPayload {
    /// The single write that completes onboarding. It marks the profile
    /// complete and re-queues the record for review from any `previous`
    /// status.
    pub fn into_patch(self, previous: VerificationStatus) -> VerificationPatch {
        let mut patch = VerificationPatch {
            status: Some(lifecycle::resubmit(previous)),
            profile_completed: Some(true),
            completion_step: Some(CompletionStep::SUBMITTED),
            phone: Some(self.personal.phone),
            store_visible: Some(self.review.store_visible),
            ..Default::default()
        };
        self.store.write_into(&mut patch);
        self.policies.write_into(&mut patch);
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketgate_types::SellerId;

    fn record_at(step: u8) -> SellerVerification {
        let mut record = SellerVerification::new_pending(SellerId::new("s").unwrap());
        record.completion_step = CompletionStep::new(step).unwrap();
        record.phone = "555-0100".into();
        record.business_name = "Loom & Co".into();
        record.business_type = "textiles".into();
        record.return_policy = "30 days".into();
        record
    }

    #[test]
    fn prefill_stops_at_completion_marker() {
        let draft = WizardDraft::from_persisted(&record_at(1), None);
        assert_eq!(draft.personal.phone, "555-0100");
        assert_eq!(draft.store, StoreDetails::default());
        assert_eq!(draft.policies, Policies::default());

        let draft = WizardDraft::from_persisted(&record_at(3), None);
        assert_eq!(draft.store.business_name, "Loom & Co");
        assert_eq!(draft.policies.return_policy, "30 days");
    }

    #[test]
    fn prefill_reads_name_from_profile() {
        let mut profile = Profile::new(SellerId::new("s").unwrap(), "s@example.com");
        profile.full_name = "Sam".into();
        let draft = WizardDraft::from_persisted(&record_at(2), Some(&profile));
        assert_eq!(draft.personal.full_name, "Sam");
    }

    #[test]
    fn patch_through_only_covers_reached_steps() {
        let mut draft = WizardDraft::default();
        draft.apply(StepData::Personal(PersonalInfo {
            full_name: "Sam".into(),
            phone: "1".into(),
            avatar_url: None,
        }));
        draft.apply(StepData::Policies(Policies {
            return_policy: "none".into(),
            shipping_policy: String::new(),
        }));

        let patch = draft.patch_through(WizardStep::PersonalInfo);
        assert_eq!(patch.phone.as_deref(), Some("1"));
        assert_eq!(patch.completion_step.map(|s| s.get()), Some(1));
        assert!(patch.business_name.is_none());
        assert!(patch.return_policy.is_none());
        assert!(patch.status.is_none());
        assert!(patch.profile_completed.is_none());

        let patch = draft.patch_through(WizardStep::Policies);
        assert_eq!(patch.return_policy.as_deref(), Some("none"));
        assert_eq!(patch.business_name.as_deref(), Some(""));
    }

    #[test]
    fn submission_requeues_from_any_status() {
        for previous in VerificationStatus::ALL {
            let patch = WizardDraft::default().review_payload().into_patch(previous);
            assert_eq!(patch.status, Some(VerificationStatus::Pending));
            assert_eq!(patch.profile_completed, Some(true));
            assert_eq!(patch.completion_step, Some(CompletionStep::SUBMITTED));
        }
    }
}

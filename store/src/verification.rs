//! Seller verification record and its storage trait.

use marketgate_types::{CompletionStep, SellerId, VerificationStatus};
use serde::{Deserialize, Serialize};

use crate::StoreError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
}

/// One record per seller tracking onboarding progress and review status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerVerification {
    pub seller_id: SellerId,
    pub status: VerificationStatus,
    /// Set only by the final onboarding submission.
    pub profile_completed: bool,
    /// Last onboarding step persisted. Never decreases.
    pub completion_step: CompletionStep,
    pub business_name: String,
    pub business_type: String,
    pub business_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: PostalAddress,
    pub store_logo: Option<String>,
    pub store_banner: Option<String>,
    pub return_policy: String,
    pub shipping_policy: String,
    pub store_visible: bool,
    pub phone: String,
    /// Optimistic concurrency counter, bumped by the store on every write.
    pub version: u64,
}

impl SellerVerification {
    /// The record created on a seller's first visit.
    pub fn new_pending(seller_id: SellerId) -> Self {
        Self {
            seller_id,
            status: VerificationStatus::Pending,
            profile_completed: false,
            completion_step: CompletionStep::NONE,
            business_name: String::new(),
            business_type: String::new(),
            business_description: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            address: PostalAddress::default(),
            store_logo: None,
            store_banner: None,
            return_policy: String::new(),
            shipping_policy: String::new(),
            store_visible: false,
            phone: String::new(),
            version: 1,
        }
    }
}

/// A partial update. `None` leaves the stored field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerificationPatch {
    pub status: Option<VerificationStatus>,
    pub profile_completed: Option<bool>,
    pub completion_step: Option<CompletionStep>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub business_description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<PostalAddress>,
    pub store_logo: Option<Option<String>>,
    pub store_banner: Option<Option<String>>,
    pub return_policy: Option<String>,
    pub shipping_policy: Option<String>,
    pub store_visible: Option<bool>,
    pub phone: Option<String>,
}

impl VerificationPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to a record in place.
    ///
    /// `completion_step` is merged with [`CompletionStep::advanced_to`], so a
    /// patch can never move the persisted marker backwards.
    pub fn apply_to(&self, record: &mut SellerVerification) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(done) = self.profile_completed {
            record.profile_completed = done;
        }
        if let Some(step) = self.completion_step {
            record.completion_step = record.completion_step.advanced_to(step);
        }
        set(&mut record.business_name, &self.business_name);
        set(&mut record.business_type, &self.business_type);
        set(&mut record.business_description, &self.business_description);
        set(&mut record.contact_email, &self.contact_email);
        set(&mut record.contact_phone, &self.contact_phone);
        set(&mut record.address, &self.address);
        set(&mut record.store_logo, &self.store_logo);
        set(&mut record.store_banner, &self.store_banner);
        set(&mut record.return_policy, &self.return_policy);
        set(&mut record.shipping_policy, &self.shipping_policy);
        if let Some(visible) = self.store_visible {
            record.store_visible = visible;
        }
        set(&mut record.phone, &self.phone);
    }
}

fn set<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *field = v.clone();
    }
}

/// Trait for storing seller verification records.
///
/// Implementations must make [`create_verification`](Self::create_verification)
/// and [`replace_verification`](Self::replace_verification) atomic with
/// respect to each other for the same seller.
pub trait VerificationStore: Send + Sync {
    /// Get the record for a seller, `None` if it was never created.
    fn get_verification(&self, seller: &SellerId) -> Result<Option<SellerVerification>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] if one exists.
    fn create_verification(&self, record: &SellerVerification) -> Result<(), StoreError>;

    /// Overwrite the stored record if its version still equals
    /// `expected_version`. The stored copy gets `expected_version + 1`,
    /// which is also the version of the returned record.
    ///
    /// Fails with [`StoreError::VersionConflict`] on a stale version and
    /// [`StoreError::NotFound`] if there is nothing to replace.
    fn replace_verification(
        &self,
        record: &SellerVerification,
        expected_version: u64,
    ) -> Result<SellerVerification, StoreError>;

    /// Number of stored records.
    fn verification_count(&self) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller() -> SellerId {
        SellerId::new("seller-1").unwrap()
    }

    #[test]
    fn patch_never_regresses_completion_step() {
        let mut record = SellerVerification::new_pending(seller());
        record.completion_step = CompletionStep::new(3).unwrap();
        let patch = VerificationPatch {
            completion_step: Some(CompletionStep::new(1).unwrap()),
            business_name: Some("Corner Shop".into()),
            ..Default::default()
        };
        patch.apply_to(&mut record);
        assert_eq!(record.completion_step.get(), 3);
        assert_eq!(record.business_name, "Corner Shop");
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut record = SellerVerification::new_pending(seller());
        let before = record.clone();
        let patch = VerificationPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut record);
        assert_eq!(record, before);
    }

    #[test]
    fn record_json_uses_collaborator_field_names() {
        let record = SellerVerification::new_pending(seller());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["seller_id"], "seller-1");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["completion_step"], 0);
        assert_eq!(json["profile_completed"], false);
        assert_eq!(json["address"]["street"], "");
        assert_eq!(json["store_visible"], false);
    }
}

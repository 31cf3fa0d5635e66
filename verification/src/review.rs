//! Reviewer decisions on seller verification records.
//!
//! Reviewer writes always win a race with the seller: a decision is applied
//! to the freshest record under the seller lock, which bumps the version and
//! makes any seller write still carrying the old version fail with a
//! conflict.

use marketgate_store::SellerVerification;
use marketgate_types::SellerId;

use crate::lifecycle::{self, ReviewDecision};
use crate::{StatusResolver, VerificationError};

pub struct Reviewer {
    resolver: StatusResolver,
}

impl Reviewer {
    pub fn new(resolver: StatusResolver) -> Self {
        Self { resolver }
    }

    /// Apply a decision. Fails with [`VerificationError::InvalidTransition`]
    /// if the record's current status does not allow it.
    pub async fn decide(
        &self,
        seller: &SellerId,
        decision: ReviewDecision,
    ) -> Result<SellerVerification, VerificationError> {
        let record = self
            .resolver
            .modify_latest(seller, move |record| {
                record.status = lifecycle::apply_review(record.status, decision)?;
                Ok(())
            })
            .await?;
        tracing::info!(seller = %seller, status = %record.status, "review decision recorded");
        Ok(record)
    }

    pub async fn approve(&self, seller: &SellerId) -> Result<SellerVerification, VerificationError> {
        self.decide(seller, ReviewDecision::Approve).await
    }

    pub async fn reject(&self, seller: &SellerId) -> Result<SellerVerification, VerificationError> {
        self.decide(seller, ReviewDecision::Reject).await
    }

    pub async fn suspend(&self, seller: &SellerId) -> Result<SellerVerification, VerificationError> {
        self.decide(seller, ReviewDecision::Suspend).await
    }
}

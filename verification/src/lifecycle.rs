//! Verification status transitions.

use marketgate_store::{SellerVerification, VerificationPatch};
use marketgate_types::{CompletionStep, VerificationStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::VerificationError;

/// Who is asking for a status change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// The seller who owns the record.
    Seller,
    /// An administrator reviewing seller applications.
    Reviewer,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seller => f.write_str("seller"),
            Self::Reviewer => f.write_str("reviewer"),
        }
    }
}

/// A reviewer's verdict on a verification record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approve,
    Reject,
    Suspend,
}

impl ReviewDecision {
    pub fn target(&self) -> VerificationStatus {
        match self {
            Self::Approve => VerificationStatus::Approved,
            Self::Reject => VerificationStatus::Rejected,
            Self::Suspend => VerificationStatus::Suspended,
        }
    }
}

/// Whether `actor` may move a record from `from` to `to`.
pub fn is_allowed(actor: Actor, from: VerificationStatus, to: VerificationStatus) -> bool {
    use VerificationStatus::*;
    match actor {
        Actor::Reviewer => matches!(
            (from, to),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Suspended)
        ),
        // Resubmission re-queues from anywhere; a seller can only ever land on pending.
        Actor::Seller => to == Pending,
    }
}

/// Resolve a reviewer decision against the current status.
pub fn apply_review(
    from: VerificationStatus,
    decision: ReviewDecision,
) -> Result<VerificationStatus, VerificationError> {
    let to = decision.target();
    if !is_allowed(Actor::Reviewer, from, to) {
        return Err(VerificationError::InvalidTransition {
            actor: Actor::Reviewer,
            from,
            to,
        });
    }
    Ok(to)
}

/// The status a record takes after the seller submits the final onboarding
/// step. Always pending, whatever it was before.
pub fn resubmit(_from: VerificationStatus) -> VerificationStatus {
    VerificationStatus::Pending
}

/// Check a seller-originated patch against the record it will be applied to.
///
/// Status and `profile_completed` only move with the final submission, and
/// the status a seller asks for must be one a seller may reach.
pub fn check_seller_patch(
    record: &SellerVerification,
    patch: &VerificationPatch,
) -> Result<(), VerificationError> {
    if let Some(to) = patch.status {
        if !is_allowed(Actor::Seller, record.status, to) {
            return Err(VerificationError::InvalidTransition {
                actor: Actor::Seller,
                from: record.status,
                to,
            });
        }
    }
    let touches_review = patch.status.is_some() || patch.profile_completed.is_some();
    if touches_review && patch.completion_step != Some(CompletionStep::SUBMITTED) {
        return Err(VerificationError::NotASubmission(record.seller_id.clone()));
    }
    Ok(())
}

//! Seller verification.
//!
//! Every seller owns exactly one verification record. It is created lazily
//! the first time the seller is seen and then moves through a small
//! lifecycle:
//! 1. **Pending**: the seller submitted (or has not yet completed) onboarding.
//! 2. **Approved / Rejected**: a reviewer decided.
//! 3. **Suspended**: a reviewer withdrew an approval.
//!
//! Rejected and suspended sellers return to pending only by resubmitting the
//! onboarding wizard. Nothing a seller does reaches approved.

pub mod error;
pub mod lifecycle;
pub mod resolver;
pub mod review;

pub use error::VerificationError;
pub use lifecycle::{Actor, ReviewDecision};
pub use resolver::StatusResolver;
pub use review::Reviewer;

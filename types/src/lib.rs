//! Fundamental types for Marketgate.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! user identities, sessions and roles, the seller verification status and the
//! onboarding completion marker.

pub mod error;
pub mod id;
pub mod session;
pub mod state;
pub mod step;

pub use error::TypesError;
pub use id::{SellerId, UserId};
pub use session::Session;
pub use state::{Role, VerificationStatus};
pub use step::CompletionStep;

//! Abstract storage traits for Marketgate.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod error;
pub mod profile;
pub mod verification;

pub use error::StoreError;
pub use profile::{Profile, ProfileStore};
pub use verification::{PostalAddress, SellerVerification, VerificationPatch, VerificationStore};

//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (verification and profile storage) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Keep everything in memory
//! - Can be told to fail or stall programmatically
//! - Count writes so tests can assert how often persistence was hit
//!
//! Usage: swap real implementations for nullables in tests.

pub mod store;

pub use store::{NullProfileStore, NullVerificationStore};

//! LMDB storage backend for Marketgate.
//!
//! Implements the storage traits from `marketgate-store` using the `heed`
//! LMDB bindings. Each logical store maps to one LMDB database within a
//! single environment; values are bincode-encoded records.

pub mod environment;
pub mod error;
pub mod profile;
pub mod verification;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use profile::LmdbProfileStore;
pub use verification::LmdbVerificationStore;

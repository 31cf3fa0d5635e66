//! Marketgate seller portal.
//!
//! Ties the verification store, the onboarding wizard and the access guard
//! together behind one entry point, and owns the process-level concerns:
//! configuration and logging.

pub mod config;
pub mod error;
pub mod logging;
pub mod portal;

pub use config::PortalConfig;
pub use error::PortalError;
pub use logging::{init_logging, LogFormat};
pub use portal::{Navigation, Portal};

//! Errors raised while parsing or constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown verification status: {0}")]
    UnknownStatus(String),

    #[error("completion step {0} is out of range 0..=4")]
    StepOutOfRange(u8),

    #[error("user id must not be empty")]
    EmptyUserId,
}

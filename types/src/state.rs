//! State enums for sessions and seller verification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// The role attached to an authenticated session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Seller,
    Buyer,
    Moderator,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Seller, Role::Buyer, Role::Moderator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Seller => "seller",
            Self::Buyer => "buyer",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "seller" => Ok(Self::Seller),
            "buyer" => Ok(Self::Buyer),
            "moderator" => Ok(Self::Moderator),
            other => Err(TypesError::UnknownRole(other.to_string())),
        }
    }
}

/// The review status of a seller's verification record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Waiting for a reviewer. Every record starts here and every
    /// resubmission returns here.
    #[default]
    Pending,
    /// Reviewed and accepted; the only status with seller-area access.
    Approved,
    /// Reviewed and refused; the seller may resubmit.
    Rejected,
    /// Previously approved, later withdrawn by a reviewer.
    Suspended,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 4] = [
        VerificationStatus::Pending,
        VerificationStatus::Approved,
        VerificationStatus::Rejected,
        VerificationStatus::Suspended,
    ];

    /// Whether the seller may use the seller dashboard.
    pub fn grants_seller_access(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether a reviewer has sent the seller back to the wizard.
    pub fn requires_resubmission(&self) -> bool {
        matches!(self, Self::Rejected | Self::Suspended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "suspended" => Ok(Self::Suspended),
            other => Err(TypesError::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_approved_grants_access() {
        for status in VerificationStatus::ALL {
            assert_eq!(
                status.grants_seller_access(),
                status == VerificationStatus::Approved
            );
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&VerificationStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
        let back: VerificationStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(back, VerificationStatus::Rejected);
    }

    #[test]
    fn role_parse_rejects_unknown() {
        assert_eq!("seller".parse::<Role>(), Ok(Role::Seller));
        assert!(matches!(
            "root".parse::<Role>(),
            Err(TypesError::UnknownRole(r)) if r == "root"
        ));
    }
}

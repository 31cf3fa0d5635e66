//! The authenticated session handed over by the auth provider.

use serde::{Deserialize, Serialize};

use crate::{Role, UserId};

/// Who is browsing, as reported by the external auth collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub role: Role,
    pub email: String,
}

impl Session {
    pub fn new(user_id: UserId, role: Role, email: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            email: email.into(),
        }
    }

    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }
}

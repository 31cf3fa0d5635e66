//! Per-user profile storage trait.

use marketgate_types::UserId;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Account-level identity shown across the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub email: String,
}

impl Profile {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            full_name: String::new(),
            avatar_url: None,
            email: email.into(),
        }
    }
}

/// Trait for storing user profiles.
pub trait ProfileStore: Send + Sync {
    /// Get a profile, `None` if the user never saved one.
    fn get_profile(&self, user: &UserId) -> Result<Option<Profile>, StoreError>;

    /// Insert or overwrite a profile.
    fn put_profile(&self, profile: &Profile) -> Result<(), StoreError>;
}

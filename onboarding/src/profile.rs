//! Async access to the profile store for the personal-info step.

use std::sync::Arc;

use marketgate_store::{Profile, ProfileStore};
use marketgate_types::Session;

use crate::{PersonalInfo, WizardError};

#[derive(Clone)]
pub struct ProfileSync {
    store: Arc<dyn ProfileStore>,
}

impl ProfileSync {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self, session: &Session) -> Result<Option<Profile>, WizardError> {
        let store = Arc::clone(&self.store);
        let user = session.user_id.clone();
        tokio::task::spawn_blocking(move || store.get_profile(&user).map_err(WizardError::Profile))
            .await
            .map_err(|e| WizardError::TaskFailed(e.to_string()))?
    }

    /// Copy the personal-info fields owned by the profile onto it, creating
    /// the profile from the session if the user has none yet.
    pub async fn save_personal(
        &self,
        session: &Session,
        personal: &PersonalInfo,
    ) -> Result<Profile, WizardError> {
        let store = Arc::clone(&self.store);
        let session = session.clone();
        let personal = personal.clone();
        tokio::task::spawn_blocking(move || {
            let mut profile = store
                .get_profile(&session.user_id)
                .map_err(WizardError::Profile)?
                .unwrap_or_else(|| Profile::new(session.user_id.clone(), session.email.clone()));
            profile.full_name = personal.full_name;
            profile.avatar_url = personal.avatar_url;
            store.put_profile(&profile).map_err(WizardError::Profile)?;
            Ok(profile)
        })
        .await
        .map_err(|e| WizardError::TaskFailed(e.to_string()))?
    }
}

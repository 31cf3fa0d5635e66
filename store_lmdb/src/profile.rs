//! LMDB implementation of ProfileStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use marketgate_store::{Profile, ProfileStore, StoreError};
use marketgate_types::UserId;

use crate::LmdbError;

pub struct LmdbProfileStore {
    pub(crate) env: Arc<Env>,
    pub(crate) profiles_db: Database<Bytes, Bytes>,
}

impl ProfileStore for LmdbProfileStore {
    fn get_profile(&self, user: &UserId) -> Result<Option<Profile>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let raw = self
            .profiles_db
            .get(&rtxn, user.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        match raw {
            Some(bytes) => {
                let profile = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    fn put_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let bytes = bincode::serialize(profile).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.profiles_db
            .put(&mut wtxn, profile.user_id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

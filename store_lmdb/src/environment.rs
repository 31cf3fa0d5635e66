//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::{LmdbError, LmdbProfileStore, LmdbVerificationStore};

const VERIFICATIONS_DB: &str = "seller_verifications";
const PROFILES_DB: &str = "profiles";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    verifications_db: Database<Bytes, Bytes>,
    profiles_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path).map_err(|e| LmdbError::Heed(e.to_string()))?;

        // SAFETY: the environment is opened once per path by this process and
        // never memory-mapped by anyone else while it is alive.
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(max_dbs)
                .map_size(map_size)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let verifications_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some(VERIFICATIONS_DB))?;
        let profiles_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some(PROFILES_DB))?;
        wtxn.commit()?;

        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            verifications_db,
            profiles_db,
        })
    }

    pub fn verification_store(&self) -> LmdbVerificationStore {
        LmdbVerificationStore {
            env: Arc::clone(&self.env),
            verifications_db: self.verifications_db,
        }
    }

    pub fn profile_store(&self) -> LmdbProfileStore {
        LmdbProfileStore {
            env: Arc::clone(&self.env),
            profiles_db: self.profiles_db,
        }
    }
}

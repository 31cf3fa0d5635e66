//! LMDB implementation of VerificationStore.
//!
//! Records are keyed by the seller id bytes. Version checks run inside the
//! same write transaction as the overwrite, so compare-and-swap is atomic.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, RoTxn};

use marketgate_store::{SellerVerification, StoreError, VerificationStore};
use marketgate_types::SellerId;

use crate::LmdbError;

pub struct LmdbVerificationStore {
    pub(crate) env: Arc<Env>,
    pub(crate) verifications_db: Database<Bytes, Bytes>,
}

impl LmdbVerificationStore {
    fn read(
        &self,
        txn: &RoTxn,
        seller: &SellerId,
    ) -> Result<Option<SellerVerification>, LmdbError> {
        match self.verifications_db.get(txn, seller.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }
}

impl VerificationStore for LmdbVerificationStore {
    fn get_verification(&self, seller: &SellerId) -> Result<Option<SellerVerification>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read(&rtxn, seller)?)
    }

    fn create_verification(&self, record: &SellerVerification) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self.read(&wtxn, &record.seller_id)?.is_some() {
            return Err(StoreError::Duplicate(record.seller_id.to_string()));
        }
        self.verifications_db
            .put(&mut wtxn, record.seller_id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::debug!(seller = %record.seller_id, "stored new verification record");
        Ok(())
    }

    fn replace_verification(
        &self,
        record: &SellerVerification,
        expected_version: u64,
    ) -> Result<SellerVerification, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let stored = self
            .read(&wtxn, &record.seller_id)?
            .ok_or_else(|| StoreError::NotFound(record.seller_id.to_string()))?;
        if stored.version != expected_version {
            return Err(StoreError::VersionConflict {
                seller: record.seller_id.clone(),
                expected: expected_version,
                found: stored.version,
            });
        }

        let mut next = record.clone();
        next.version = expected_version + 1;
        let bytes = bincode::serialize(&next).map_err(LmdbError::from)?;
        self.verifications_db
            .put(&mut wtxn, next.seller_id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(next)
    }

    fn verification_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.verifications_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}

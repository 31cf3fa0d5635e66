//! Status resolver: the async front of the verification store.
//!
//! Store backends are synchronous, so every call runs on the blocking pool.
//! Writes for the same seller are serialized behind a per-seller lock;
//! different sellers proceed in parallel. The lock guard is moved into the
//! blocking task, so a write that has started always runs to completion and
//! keeps the next writer waiting even if the caller stops awaiting it.

use std::collections::HashMap;
use std::sync::Arc;

use marketgate_store::{SellerVerification, StoreError, VerificationPatch, VerificationStore};
use marketgate_types::{SellerId, VerificationStatus};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{lifecycle, VerificationError};

pub struct StatusResolver {
    store: Arc<dyn VerificationStore>,
    /// Per-seller write locks.
    seller_locks: Arc<Mutex<HashMap<SellerId, Arc<Mutex<()>>>>>,
}

impl Clone for StatusResolver {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            seller_locks: Arc::clone(&self.seller_locks),
        }
    }
}

impl StatusResolver {
    pub fn new(store: Arc<dyn VerificationStore>) -> Self {
        Self {
            store,
            seller_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Acquire the write lock for one seller.
    async fn lock_seller(&self, seller: &SellerId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.seller_locks.lock().await;
            locks
                .entry(seller.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Fetch the seller's record, creating a pending one if none exists.
    ///
    /// Idempotent: repeated and concurrent calls converge on the same record.
    pub async fn ensure_verification(
        &self,
        seller: &SellerId,
    ) -> Result<SellerVerification, VerificationError> {
        let guard = self.lock_seller(seller).await;
        let store = Arc::clone(&self.store);
        let owner = seller.clone();
        let result = run_blocking(move || {
            let _guard = guard;
            if let Some(existing) = store.get_verification(&owner)? {
                return Ok(existing);
            }
            let fresh = SellerVerification::new_pending(owner.clone());
            match store.create_verification(&fresh) {
                Ok(()) => {
                    tracing::info!(seller = %owner, "created pending verification record");
                    Ok(fresh)
                }
                // Another process created it between our read and write.
                Err(StoreError::Duplicate(_)) => store
                    .get_verification(&owner)?
                    .ok_or(VerificationError::NotFound(owner)),
                Err(e) => Err(e.into()),
            }
        })
        .await;
        self.release_seller(seller).await;
        result
    }

    /// Read the seller's record without creating it.
    pub async fn fetch_verification(
        &self,
        seller: &SellerId,
    ) -> Result<Option<SellerVerification>, VerificationError> {
        let store = Arc::clone(&self.store);
        let seller = seller.clone();
        run_blocking(move || Ok(store.get_verification(&seller)?)).await
    }

    /// The seller's current status, `None` if no record exists yet.
    pub async fn current_status(
        &self,
        seller: &SellerId,
    ) -> Result<Option<VerificationStatus>, VerificationError> {
        Ok(self.fetch_verification(seller).await?.map(|r| r.status))
    }

    /// Apply a seller's partial update written against `expected_version`.
    ///
    /// Fails with [`VerificationError::Conflict`] if anyone else wrote the
    /// record since the caller read it, and with
    /// [`VerificationError::InvalidTransition`] or
    /// [`VerificationError::NotASubmission`] if the patch touches review
    /// state a seller may not set. Errors are always returned, never logged
    /// and dropped.
    pub async fn update_verification(
        &self,
        seller: &SellerId,
        patch: VerificationPatch,
        expected_version: u64,
    ) -> Result<SellerVerification, VerificationError> {
        let guard = self.lock_seller(seller).await;
        let store = Arc::clone(&self.store);
        let owner = seller.clone();
        let result = run_blocking(move || {
            let _guard = guard;
            let mut record = store
                .get_verification(&owner)?
                .ok_or_else(|| VerificationError::NotFound(owner.clone()))?;
            if record.version != expected_version {
                return Err(VerificationError::Conflict {
                    seller: owner,
                    expected: expected_version,
                    found: record.version,
                });
            }
            lifecycle::check_seller_patch(&record, &patch)?;
            patch.apply_to(&mut record);
            let stored = store.replace_verification(&record, expected_version)?;
            tracing::debug!(
                seller = %owner,
                version = stored.version,
                step = %stored.completion_step,
                "verification updated"
            );
            Ok(stored)
        })
        .await;
        self.release_seller(seller).await;
        result
    }

    /// Read the freshest record and rewrite it under the seller lock.
    ///
    /// Used for reviewer decisions, which always apply to the latest state.
    pub(crate) async fn modify_latest<F>(
        &self,
        seller: &SellerId,
        modify: F,
    ) -> Result<SellerVerification, VerificationError>
    where
        F: FnOnce(&mut SellerVerification) -> Result<(), VerificationError> + Send + 'static,
    {
        let guard = self.lock_seller(seller).await;
        let store = Arc::clone(&self.store);
        let owner = seller.clone();
        let result = run_blocking(move || {
            let _guard = guard;
            let mut record = store
                .get_verification(&owner)?
                .ok_or_else(|| VerificationError::NotFound(owner.clone()))?;
            let version = record.version;
            modify(&mut record)?;
            Ok(store.replace_verification(&record, version)?)
        })
        .await;
        self.release_seller(seller).await;
        result
    }

    /// Drop the seller's lock entry once nobody holds or waits on it.
    ///
    /// Handles are only cloned under the map lock, so a count of one means
    /// the map holds the last reference.
    async fn release_seller(&self, seller: &SellerId) {
        let mut locks = self.seller_locks.lock().await;
        if locks
            .get(seller)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(seller);
        }
    }

    /// Number of sellers with a live lock entry.
    pub async fn tracked_sellers(&self) -> usize {
        self.seller_locks.lock().await.len()
    }

    /// Drop lock entries nobody is waiting on, including ones left behind by
    /// callers that stopped awaiting a write.
    pub async fn cleanup(&self) {
        let mut locks = self.seller_locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, VerificationError>
where
    F: FnOnce() -> Result<T, VerificationError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| VerificationError::TaskFailed(e.to_string()))?
}

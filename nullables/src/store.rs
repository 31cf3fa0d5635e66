//! Nullable stores: thread-safe in-memory storage for testing.

use marketgate_store::{Profile, ProfileStore, SellerVerification, StoreError, VerificationStore};
use marketgate_types::{SellerId, UserId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Programmable failure and latency shared by the null stores.
#[derive(Default)]
struct Faults {
    /// Number of upcoming writes that fail with a backend error.
    failing_writes: u32,
    /// When set, reads fail too.
    offline: bool,
    /// Artificial latency applied to every write.
    write_delay: Option<Duration>,
}

impl Faults {
    fn check_read(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Backend("store offline".into()));
        }
        Ok(())
    }

    fn check_write(&mut self) -> Result<(), StoreError> {
        self.check_read()?;
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(StoreError::Backend("injected write failure".into()));
        }
        Ok(())
    }
}

/// An in-memory verification store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullVerificationStore {
    records: Mutex<HashMap<String, SellerVerification>>,
    faults: Mutex<Faults>,
    writes: Mutex<u64>,
}

impl NullVerificationStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            faults: Mutex::new(Faults::default()),
            writes: Mutex::new(0),
        }
    }

    /// Make the next `count` writes fail.
    pub fn fail_next_writes(&self, count: u32) {
        self.faults.lock().unwrap().failing_writes = count;
    }

    /// Make every read and write fail until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.faults.lock().unwrap().offline = offline;
    }

    /// Stall every write by `delay`, on the calling thread.
    pub fn set_write_delay(&self, delay: Duration) {
        self.faults.lock().unwrap().write_delay = Some(delay);
    }

    /// Number of successful writes (creates and replaces).
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().unwrap()
    }

    /// Seed or overwrite a record directly, bypassing version checks.
    pub fn insert_raw(&self, record: SellerVerification) {
        self.records
            .lock()
            .unwrap()
            .insert(record.seller_id.to_string(), record);
    }

    fn before_write(&self) -> Result<(), StoreError> {
        let delay = {
            let mut faults = self.faults.lock().unwrap();
            faults.check_write()?;
            faults.write_delay
        };
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        Ok(())
    }
}

impl Default for NullVerificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationStore for NullVerificationStore {
    fn get_verification(&self, seller: &SellerId) -> Result<Option<SellerVerification>, StoreError> {
        self.faults.lock().unwrap().check_read()?;
        Ok(self.records.lock().unwrap().get(seller.as_str()).cloned())
    }

    fn create_verification(&self, record: &SellerVerification) -> Result<(), StoreError> {
        self.before_write()?;
        let mut records = self.records.lock().unwrap();
        let key = record.seller_id.to_string();
        if records.contains_key(&key) {
            return Err(StoreError::Duplicate(key));
        }
        records.insert(key, record.clone());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    fn replace_verification(
        &self,
        record: &SellerVerification,
        expected_version: u64,
    ) -> Result<SellerVerification, StoreError> {
        self.before_write()?;
        let mut records = self.records.lock().unwrap();
        let stored = records
            .get_mut(record.seller_id.as_str())
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
        *stored = next.clone();
        *self.writes.lock().unwrap() += 1;
        Ok(next)
    }

    fn verification_count(&self) -> Result<u64, StoreError> {
        self.faults.lock().unwrap().check_read()?;
        Ok(self.records.lock().unwrap().len() as u64)
    }
}

/// An in-memory profile store for testing.
pub struct NullProfileStore {
    profiles: Mutex<HashMap<String, Profile>>,
    faults: Mutex<Faults>,
    writes: Mutex<u64>,
}

impl NullProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            faults: Mutex::new(Faults::default()),
            writes: Mutex::new(0),
        }
    }

    /// Make the next `count` writes fail.
    pub fn fail_next_writes(&self, count: u32) {
        self.faults.lock().unwrap().failing_writes = count;
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().unwrap()
    }
}

impl Default for NullProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for NullProfileStore {
    fn get_profile(&self, user: &UserId) -> Result<Option<Profile>, StoreError> {
        self.faults.lock().unwrap().check_read()?;
        Ok(self.profiles.lock().unwrap().get(user.as_str()).cloned())
    }

    fn put_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.faults.lock().unwrap().check_write()?;
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id.to_string(), profile.clone());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketgate_types::VerificationStatus;

    fn seller() -> SellerId {
        SellerId::new("seller-1").unwrap()
    }

    #[test]
    fn create_twice_is_duplicate() {
        let store = NullVerificationStore::new();
        let record = SellerVerification::new_pending(seller());
        store.create_verification(&record).unwrap();
        assert!(matches!(
            store.create_verification(&record),
            Err(StoreError::Duplicate(_))
        ));
        assert_eq!(store.verification_count().unwrap(), 1);
    }

    #[test]
    fn replace_bumps_version() {
        let store = NullVerificationStore::new();
        let record = SellerVerification::new_pending(seller());
        store.create_verification(&record).unwrap();
        let mut changed = record.clone();
        changed.status = VerificationStatus::Approved;
        let stored = store.replace_verification(&changed, 1).unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(
            store.get_verification(&seller()).unwrap().unwrap().status,
            VerificationStatus::Approved
        );
    }

    #[test]
    fn stale_replace_is_conflict() {
        let store = NullVerificationStore::new();
        let record = SellerVerification::new_pending(seller());
        store.create_verification(&record).unwrap();
        store.replace_verification(&record, 1).unwrap();
        let err = store.replace_verification(&record, 1).unwrap_err();
        assert_eq!(
            err,
            StoreError::VersionConflict {
                seller: seller(),
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn injected_failures_are_consumed() {
        let store = NullVerificationStore::new();
        store.fail_next_writes(1);
        let record = SellerVerification::new_pending(seller());
        assert!(matches!(
            store.create_verification(&record),
            Err(StoreError::Backend(_))
        ));
        store.create_verification(&record).unwrap();
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn offline_store_fails_reads() {
        let store = NullVerificationStore::new();
        store.set_offline(true);
        assert!(store.get_verification(&seller()).is_err());
        store.set_offline(false);
        assert_eq!(store.get_verification(&seller()).unwrap(), None);
    }

    #[test]
    fn profile_put_get() {
        let store = NullProfileStore::new();
        let mut profile = Profile::new(seller(), "a@example.com");
        profile.full_name = "Ada".into();
        store.put_profile(&profile).unwrap();
        assert_eq!(store.get_profile(&seller()).unwrap(), Some(profile));
        assert_eq!(store.write_count(), 1);
    }
}

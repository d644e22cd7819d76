use async_trait::async_trait;

use super::domain::Address;
use crate::errors::Result;

/// Persistence capability the address service is written against.
///
/// Implementations provide at least per-record atomicity for `save`,
/// `delete_by_id` and `exists_by_id`.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Every persisted address.
    async fn find_all(&self) -> Result<Vec<Address>>;

    /// Returns `Ok(None)` when the id does not resolve.
    async fn find_by_id(&self, id: i64) -> Result<Option<Address>>;

    /// Insert when `address` has no id, otherwise overwrite the mutable fields
    /// of the stored record. Fails with `StorageError::Stale` when the id no
    /// longer resolves.
    async fn save(&self, address: Address) -> Result<Address>;

    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Remove the record if present. Absent ids are a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Remove the record and report whether it existed.
    ///
    /// The default body is a plain check-then-act; stores that can answer in a
    /// single step override it.
    async fn delete_if_exists(&self, id: i64) -> Result<bool> {
        if !self.exists_by_id(id).await? {
            return Ok(false);
        }
        self.delete_by_id(id).await?;
        Ok(true)
    }
}

/// In-memory repository backed by a sharded concurrent map.
pub mod memory {
    use std::sync::atomic::{AtomicI64, Ordering};

    use dashmap::DashMap;

    use super::*;
    use crate::errors::StorageError;

    pub struct InMemoryAddressRepository {
        records: DashMap<i64, Address>,
        next_id: AtomicI64,
    }

    impl Default for InMemoryAddressRepository {
        fn default() -> Self {
            Self { records: DashMap::new(), next_id: AtomicI64::new(1) }
        }
    }

    impl InMemoryAddressRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.records.len()
        }

        pub fn is_empty(&self) -> bool {
            self.records.is_empty()
        }
    }

    #[async_trait]
    impl AddressRepository for InMemoryAddressRepository {
        async fn find_all(&self) -> Result<Vec<Address>> {
            let mut all: Vec<Address> = self.records.iter().map(|e| e.value().clone()).collect();
            all.sort_by_key(|a| a.id);
            Ok(all)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Address>> {
            Ok(self.records.get(&id).map(|e| e.value().clone()))
        }

        async fn save(&self, address: Address) -> Result<Address> {
            match address.persisted_id() {
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                    let stored = Address { id: Some(id), ..address };
                    self.records.insert(id, stored.clone());
                    Ok(stored)
                }
                Some(id) => {
                    let mut entry = self.records.get_mut(&id).ok_or(StorageError::Stale(id))?;
                    entry.name = address.name;
                    entry.phone_number = address.phone_number;
                    Ok(entry.value().clone())
                }
            }
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool> {
            Ok(self.records.contains_key(&id))
        }

        async fn delete_by_id(&self, id: i64) -> Result<()> {
            self.records.remove(&id);
            Ok(())
        }

        async fn delete_if_exists(&self, id: i64) -> Result<bool> {
            Ok(self.records.remove(&id).is_some())
        }
    }

}

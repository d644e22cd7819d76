use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Address, AddressPatch};
use super::repository::AddressRepository;
use crate::errors::Result;

/// Address book lifecycle rules on top of an [`AddressRepository`].
///
/// The service keeps no state of its own. Not-found outcomes are returned as
/// `None`/`false`; storage failures propagate unchanged.
pub struct AddressService<R: AddressRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: AddressRepository + ?Sized> Clone for AddressService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo) }
    }
}

impl<R: AddressRepository + ?Sized> AddressService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<Address>> {
        self.repo.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Address>> {
        self.repo.find_by_id(id).await
    }

    /// Persist a new address. Any id on the input is discarded.
    ///
    /// # Examples
    /// ```
    /// use service::address::repository::memory::InMemoryAddressRepository;
    /// use service::address::{Address, AddressService};
    /// use std::sync::Arc;
    /// let svc = AddressService::new(Arc::new(InMemoryAddressRepository::new()));
    /// let mut input = Address::new("Test Name", "1234567890");
    /// input.id = Some(99);
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.id, Some(1));
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, mut input: Address) -> Result<Address> {
        input.id = None;
        let created = self.repo.save(input).await?;
        info!(id = ?created.id, "address_created");
        Ok(created)
    }

    /// Read-modify-write of `name` and `phone_number`.
    ///
    /// Returns `Ok(None)` when `id` does not resolve; an update never creates
    /// a record.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: AddressPatch) -> Result<Option<Address>> {
        let Some(mut existing) = self.repo.find_by_id(id).await? else {
            debug!("address not found");
            return Ok(None);
        };
        existing.apply(patch);
        let saved = self.repo.save(existing).await?;
        info!(id, "address_updated");
        Ok(Some(saved))
    }

    /// Returns `Ok(false)` when there was nothing to delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self.repo.delete_if_exists(id).await?;
        if deleted {
            info!(id, "address_deleted");
        } else {
            debug!("address not found");
        }
        Ok(deleted)
    }
}

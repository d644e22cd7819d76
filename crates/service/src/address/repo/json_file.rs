use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::address::domain::Address;
use crate::address::repository::AddressRepository;
use crate::errors::{Result, StorageError};

/// On-disk document. `next_id` survives restarts so ids are never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    next_id: i64,
    addresses: BTreeMap<i64, Address>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self { next_id: 1, addresses: BTreeMap::new() }
    }
}

/// JSON file-backed address repository.
///
/// Keeps the whole book in memory and rewrites the file after every mutation.
/// Writers hold the lock across the file write, so on-disk order matches the
/// order mutations were applied.
pub struct JsonFileAddressRepository {
    inner: RwLock<Snapshot>,
    file_path: PathBuf,
}

impl JsonFileAddressRepository {
    /// Open the store at `path`. Creates the file with an empty book if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let snapshot = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice::<Snapshot>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = Snapshot::default();
                write_atomically(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(e.into()),
        };
        debug!(
            path = %file_path.display(),
            count = snapshot.addresses.len(),
            "json address store opened"
        );

        Ok(Arc::new(Self { inner: RwLock::new(snapshot), file_path }))
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

async fn write_atomically(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let data = serde_json::to_vec_pretty(snapshot)?;
    let tmp = temp_path_for(path);
    let written = match fs::write(&tmp, data).await {
        Ok(()) => fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        // best effort
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl AddressRepository for JsonFileAddressRepository {
    async fn find_all(&self) -> Result<Vec<Address>> {
        let snapshot = self.inner.read().await;
        Ok(snapshot.addresses.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>> {
        let snapshot = self.inner.read().await;
        Ok(snapshot.addresses.get(&id).cloned())
    }

    async fn save(&self, address: Address) -> Result<Address> {
        let mut snapshot = self.inner.write().await;
        let mut next = snapshot.clone();
        let stored = match address.persisted_id() {
            None => {
                let id = next.next_id;
                next.next_id += 1;
                let stored = Address { id: Some(id), ..address };
                next.addresses.insert(id, stored.clone());
                stored
            }
            Some(id) => {
                let existing = next.addresses.get_mut(&id).ok_or(StorageError::Stale(id))?;
                existing.name = address.name;
                existing.phone_number = address.phone_number;
                existing.clone()
            }
        };
        // Only publish the new state once it is on disk.
        write_atomically(&self.file_path, &next).await?;
        *snapshot = next;
        Ok(stored)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let snapshot = self.inner.read().await;
        Ok(snapshot.addresses.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.delete_if_exists(id).await.map(|_| ())
    }

    async fn delete_if_exists(&self, id: i64) -> Result<bool> {
        let mut snapshot = self.inner.write().await;
        if !snapshot.addresses.contains_key(&id) {
            return Ok(false);
        }
        let mut next = snapshot.clone();
        next.addresses.remove(&id);
        write_atomically(&self.file_path, &next).await?;
        *snapshot = next;
        Ok(true)
    }
}

//! Runtime wiring
//!
//! Builds the configured `AddressRepository` so binaries do not depend on the
//! concrete stores directly.

use std::sync::Arc;

use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tracing::info;

use crate::address::repo::{json_file::JsonFileAddressRepository, seaorm::SeaOrmAddressRepository};
use crate::address::repository::{memory::InMemoryAddressRepository, AddressRepository};

/// Open the repository selected by `[storage] backend`.
///
/// The postgres backend connects with the `[database]` pool settings and runs
/// pending migrations before returning.
pub async fn open_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn AddressRepository>> {
    let repo: Arc<dyn AddressRepository> = match cfg.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryAddressRepository::new()),
        StorageBackend::Json => JsonFileAddressRepository::open(&cfg.storage.json_path).await?,
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            Arc::new(SeaOrmAddressRepository::new(db))
        }
    };
    info!(backend = ?cfg.storage.backend, "address repository ready");
    Ok(repo)
}

#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    DatabaseConfig {
        min_connections: 1,
        connect_timeout_secs: 3,
        acquire_timeout_secs: 3,
        ..DatabaseConfig::default()
    }
}

/// Connect to the test database (`DATABASE_URL`), migrating it on first use.
pub async fn get_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = test_config();
    MIGRATED
        .get_or_try_init(|| async {
            // throwaway connection, dropped once the schema is in place
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    connect_with_config(&cfg).await
}

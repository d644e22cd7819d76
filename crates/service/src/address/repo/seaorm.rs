use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set, Unchanged}, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryOrder,
};

use models::address;

use crate::address::domain::Address;
use crate::address::repository::AddressRepository;
use crate::errors::{Result, StorageError};

/// SeaORM-backed repository over the `address` table.
pub struct SeaOrmAddressRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn find_all(&self) -> Result<Vec<Address>> {
        let rows = address::Entity::find()
            .order_by_asc(address::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>> {
        Ok(address::Entity::find_by_id(id).one(&self.db).await?.map(Address::from))
    }

    async fn save(&self, input: Address) -> Result<Address> {
        match input.persisted_id() {
            None => {
                let am = address::ActiveModel {
                    id: NotSet,
                    name: Set(input.name),
                    phone_number: Set(input.phone_number),
                };
                Ok(am.insert(&self.db).await?.into())
            }
            Some(id) => {
                let am = address::ActiveModel {
                    id: Unchanged(id),
                    name: Set(input.name),
                    phone_number: Set(input.phone_number),
                };
                match am.update(&self.db).await {
                    Ok(m) => Ok(m.into()),
                    Err(DbErr::RecordNotUpdated) => Err(StorageError::Stale(id)),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(address::Entity::find_by_id(id).count(&self.db).await? > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        address::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn delete_if_exists(&self, id: i64) -> Result<bool> {
        let res = address::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_address_crud() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };
        let repo = SeaOrmAddressRepository::new(db);

        let created = repo.save(Address::new("Db Name", "1234567890")).await?;
        let id = created.id.expect("assigned id");
        assert!(repo.exists_by_id(id).await?);

        let updated = repo
            .save(Address {
                id: Some(id),
                name: "Db Updated".into(),
                phone_number: "0987654321".into(),
            })
            .await?;
        assert_eq!(updated.id, Some(id));
        assert_eq!(repo.find_by_id(id).await?.unwrap().name, "Db Updated");
        assert!(repo.find_all().await?.iter().any(|a| a.id == Some(id)));

        assert!(repo.delete_if_exists(id).await?);
        assert!(!repo.delete_if_exists(id).await?);
        repo.delete_by_id(id).await?;
        assert!(repo.find_by_id(id).await?.is_none());

        let err = repo
            .save(Address { id: Some(id), name: "Ghost".into(), phone_number: "0".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Stale(s) if s == id));
        Ok(())
    }
}

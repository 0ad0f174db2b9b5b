use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, TransactionTrait};

use models::product::{self, ProductCreateInput, ProductUpdateInput};

use crate::errors::ServiceError;

/// Persistence seam for products, keyed by the integer id.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: ProductCreateInput) -> Result<product::Model, ServiceError>;
    async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError>;
    /// `Ok(None)` for an unknown id.
    async fn find_one(&self, id: i32) -> Result<Option<product::Model>, ServiceError>;
    /// Fails with `NotFound` for an unknown id.
    async fn update(&self, id: i32, patch: ProductUpdateInput) -> Result<product::Model, ServiceError>;
    /// Returns the row as it was before deletion; `NotFound` for an unknown id.
    async fn remove(&self, id: i32) -> Result<product::Model, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn create(&self, input: ProductCreateInput) -> Result<product::Model, ServiceError> {
        let am = input.into_active_model(Utc::now().into());
        Ok(am.insert(&self.db).await?)
    }

    async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        Ok(product::Entity::find().all(&self.db).await?)
    }

    async fn find_one(&self, id: i32) -> Result<Option<product::Model>, ServiceError> {
        Ok(product::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update(&self, id: i32, patch: ProductUpdateInput) -> Result<product::Model, ServiceError> {
        // lookup and write share one transaction; dropping it on error rolls back
        let txn = self.db.begin().await?;
        let mut am: product::ActiveModel = product::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))?
            .into();
        patch.apply(&mut am, Utc::now().into());
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn remove(&self, id: i32) -> Result<product::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = product::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))?;
        product::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(existing)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use sea_orm::DbErr;

    #[derive(Default)]
    pub struct MockProductRepository {
        rows: Mutex<BTreeMap<i32, product::Model>>,
        next_id: Mutex<i32>,
    }

    impl MockProductRepository {
        pub fn len(&self) -> usize { self.rows.lock().unwrap().len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn create(&self, input: ProductCreateInput) -> Result<product::Model, ServiceError> {
            let now = Utc::now().into();
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let row = product::Model {
                id: *next_id,
                name: input.name,
                cost: input.cost,
                price: input.price,
                stock: input.stock,
                active: input.active.unwrap_or(true),
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().insert(row.id, row.clone());
            Ok(row)
        }

        async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn find_one(&self, id: i32) -> Result<Option<product::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn update(&self, id: i32, patch: ProductUpdateInput) -> Result<product::Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("product", id))?;
            if let Some(name) = patch.name { row.name = name; }
            if let Some(cost) = patch.cost { row.cost = cost; }
            if let Some(price) = patch.price { row.price = price; }
            if let Some(stock) = patch.stock { row.stock = stock; }
            if let Some(active) = patch.active { row.active = active; }
            row.updated_at = Utc::now().into();
            Ok(row.clone())
        }

        async fn remove(&self, id: i32) -> Result<product::Model, ServiceError> {
            self.rows
                .lock()
                .unwrap()
                .remove(&id)
                .ok_or_else(|| ServiceError::not_found("product", id))
        }
    }

    /// Repository whose every call fails as if the database were unreachable.
    #[derive(Default)]
    pub struct UnavailableProductRepository;

    impl UnavailableProductRepository {
        fn err() -> ServiceError { ServiceError::Persistence(DbErr::Custom("connection refused".into())) }
    }

    #[async_trait]
    impl ProductRepository for UnavailableProductRepository {
        async fn create(&self, _input: ProductCreateInput) -> Result<product::Model, ServiceError> { Err(Self::err()) }
        async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> { Err(Self::err()) }
        async fn find_one(&self, _id: i32) -> Result<Option<product::Model>, ServiceError> { Err(Self::err()) }
        async fn update(&self, _id: i32, _patch: ProductUpdateInput) -> Result<product::Model, ServiceError> { Err(Self::err()) }
        async fn remove(&self, _id: i32) -> Result<product::Model, ServiceError> { Err(Self::err()) }
    }
}

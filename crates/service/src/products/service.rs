use std::sync::Arc;

use tracing::instrument;

use models::product::{self, ProductCreateInput, ProductUpdateInput};

use crate::errors::ServiceError;
use crate::products::repository::ProductRepository;

/// Stateless façade over a [`ProductRepository`].
///
/// Every operation is a single repository call; results and errors are
/// returned exactly as the repository produced them.
pub struct ProductsService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductsService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a product; `active` defaults to `true` when omitted.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::product::ProductCreateInput;
    /// use service::products::{repository::mock::MockProductRepository, ProductsService};
    /// let svc = ProductsService::new(Arc::new(MockProductRepository::default()));
    /// let input = ProductCreateInput { name: "Widget".into(), cost: 5.0, price: 9.0, stock: 100, active: None };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert!(created.active);
    /// assert_eq!(created.created_at, created.updated_at);
    /// ```
    #[instrument(level = "debug", skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductCreateInput) -> Result<product::Model, ServiceError> {
        self.repo.create(input).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        self.repo.find_all().await
    }

    /// `Ok(None)` when no product has this id.
    #[instrument(level = "debug", skip(self))]
    pub async fn find_one(&self, id: i32) -> Result<Option<product::Model>, ServiceError> {
        self.repo.find_one(id).await
    }

    /// Apply a partial update. Unknown ids fail with [`ServiceError::NotFound`].
    #[instrument(level = "debug", skip(self, patch))]
    pub async fn update(&self, id: i32, patch: ProductUpdateInput) -> Result<product::Model, ServiceError> {
        self.repo.update(id, patch).await
    }

    /// Delete and return the removed row. Unknown ids fail with [`ServiceError::NotFound`].
    #[instrument(level = "debug", skip(self))]
    pub async fn remove(&self, id: i32) -> Result<product::Model, ServiceError> {
        self.repo.remove(id).await
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Storage abstraction for the product catalog
///
/// The service only talks to this trait; the MongoDB implementation
/// lives in [`crate::mongodb`] and tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product built from a validated payload
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Fetch one page of products matching the filter, newest first
    async fn list(
        &self,
        filter: ProductFilter,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>>;

    /// Count all products matching the filter, ignoring pagination
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;

    /// Apply a partial update; `None` when no product has this id
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Set the featured flag; `None` when no product has this id
    async fn set_featured(&self, id: Uuid, featured: bool) -> ProductResult<Option<Product>>;

    /// Delete a product; `false` when no product had this id
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::cache::{LISTING_PATH, ViewCache, product_path};
use crate::error::{ProductError, ProductResult};
use crate::models::{ListParams, Pagination, Product, ProductFilter, ProductPage};
use crate::repository::ProductRepository;
use crate::validate::{ProductForm, field_errors_from, validate_create, validate_update};

/// Product service providing business logic operations
///
/// The service validates raw input, orchestrates the repository, and
/// signals the view cache after every successful write. Cache failures
/// are logged and swallowed; a write never fails because the cache is
/// down.
pub struct ProductService<R: ProductRepository, C: ViewCache> {
    repository: Arc<R>,
    cache: Arc<C>,
}

impl<R: ProductRepository, C: ViewCache> ProductService<R, C> {
    /// Create a new ProductService with the given repository and cache
    pub fn new(repository: R, cache: C) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Arc::new(cache),
        }
    }

    /// Create a new product from raw form input
    #[instrument(skip(self, form))]
    pub async fn create(&self, form: &ProductForm) -> ProductResult<Product> {
        let input = validate_create(form).map_err(ProductError::Validation)?;
        input
            .validate()
            .map_err(|e| ProductError::Validation(field_errors_from(&e)))?;

        let product = self.repository.create(input).await?;
        self.invalidate(LISTING_PATH).await;
        Ok(product)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_one(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List one page of products
    ///
    /// The pagination total counts everything matching the filter, not
    /// just the returned page. Page numbers below 1 are treated as 1.
    #[instrument(skip(self))]
    pub async fn list(&self, params: ListParams) -> ProductResult<ProductPage> {
        let page = params.page.max(1);
        let limit = params.limit.max(1);
        // Saturate: an absurd page number yields an empty page, not a panic
        let skip = page.saturating_sub(1).saturating_mul(limit as u64);

        let filter = ProductFilter {
            search: params.search,
            category: params.category,
        };

        let products = self.repository.list(filter.clone(), skip, limit).await?;
        let total = self.repository.count(filter).await?;

        Ok(ProductPage {
            products,
            pagination: Pagination::new(page, limit, total),
        })
    }

    /// Apply a partial update from raw form input
    #[instrument(skip(self, form))]
    pub async fn update(&self, id: Uuid, form: &ProductForm) -> ProductResult<Product> {
        let input = validate_update(form).map_err(ProductError::Validation)?;
        input
            .validate()
            .map_err(|e| ProductError::Validation(field_errors_from(&e)))?;

        let product = self
            .repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        self.invalidate(LISTING_PATH).await;
        self.invalidate(&product_path(id)).await;
        Ok(product)
    }

    /// Flip the featured flag
    #[instrument(skip(self))]
    pub async fn toggle_featured(&self, id: Uuid) -> ProductResult<Product> {
        let current = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let product = self
            .repository
            .set_featured(id, !current.featured)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        self.invalidate(LISTING_PATH).await;
        self.invalidate(&product_path(id)).await;
        Ok(product)
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        self.invalidate(LISTING_PATH).await;
        Ok(())
    }

    async fn invalidate(&self, path: &str) {
        if let Err(error) = self.cache.invalidate(path).await {
            warn!(%path, %error, "View cache invalidation failed");
        }
    }
}

impl<R: ProductRepository, C: ViewCache> Clone for ProductService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
        }
    }
}

//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for query performance and name uniqueness
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // Unique name index backs the duplicate-name check
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_name_unique".to_string())
                        .build(),
                )
                .build(),
            // Category + recency for the listing query
            IndexModel::builder()
                .keys(doc! { "category": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_created".to_string())
                        .build(),
                )
                .build(),
            // Recency alone for unfiltered listings
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            doc.insert("category", category.to_string());
        }

        if let Some(ref search) = filter.search {
            // Quote metacharacters so the search stays a substring match
            let pattern = escape_regex(search);
            doc.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": &pattern, "$options": "i" } },
                    doc! { "description": { "$regex": &pattern, "$options": "i" } },
                ],
            );
        }

        doc
    }

    /// Build the `$set` document for a partial update
    ///
    /// Only supplied fields are written; `updated_at` is always bumped.
    fn build_update(input: &UpdateProduct) -> Document {
        let mut set = doc! {};

        if let Some(ref name) = input.name {
            set.insert("name", name);
        }
        if let Some(ref description) = input.description {
            set.insert("description", description);
        }
        if let Some(price) = input.price {
            set.insert("price", price);
        }
        if let Some(stock) = input.stock {
            set.insert("stock", stock);
        }
        if let Some(ref category) = input.category {
            set.insert("category", category.to_string());
        }
        if let Some(ref images) = input.images {
            set.insert(
                "images",
                Bson::Array(images.iter().map(|i| Bson::String(i.clone())).collect()),
            );
        }
        if let Some(featured) = input.featured {
            set.insert("featured", featured);
        }

        set.insert("updated_at", Utc::now().to_rfc3339());
        set
    }

    fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
                write_error.code == DUPLICATE_KEY_CODE
            }
            ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
            _ => false,
        }
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Map an update write error, attributing duplicate-key conflicts
    /// to the name being written. The unique index only covers `name`,
    /// so a conflict without a name change stays a database error.
    fn map_write_conflict(err: mongodb::error::Error, name: Option<&str>) -> ProductError {
        match name {
            Some(name) if Self::is_duplicate_key(&err) => {
                ProductError::DuplicateName(name.to_string())
            }
            _ => err.into(),
        }
    }
}

/// Escape characters that carry meaning in a `$regex` pattern
fn escape_regex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(
            c,
            '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        if let Err(err) = self.collection.insert_one(&product).await {
            if Self::is_duplicate_key(&err) {
                return Err(ProductError::DuplicateName(product.name));
            }
            return Err(err.into());
        }

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: ProductFilter,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(limit)
            .skip(skip)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let update = doc! { "$set": Self::build_update(&input) };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), update)
            .with_options(options)
            .await
            .map_err(|err| Self::map_write_conflict(err, input.name.as_deref()))?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn set_featured(&self, id: Uuid, featured: bool) -> ProductResult<Option<Product>> {
        let update = doc! {
            "$set": {
                "featured": featured,
                "updated_at": Utc::now().to_rfc3339(),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), update)
            .with_options(options)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, featured, "Product featured flag set");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}

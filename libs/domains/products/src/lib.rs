//! Products Domain
//!
//! This module provides a complete domain implementation for a product
//! catalog backed by MongoDB, with Redis-backed view-cache
//! invalidation on every write.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, business logic, cache signals
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │ Repository  │     │  ViewCache  │  ← Invalidation signals (Redis)
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     cache::RedisViewCache,
//!     handlers,
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let redis_client = redis::Client::open("redis://127.0.0.1:6379")?;
//! let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;
//!
//! let repository = MongoProductRepository::new(&db);
//! let cache = RedisViewCache::new(redis_conn);
//! let service = ProductService::new(repository, cache);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod response;
pub mod service;
pub mod validate;

// Re-export commonly used types
pub use cache::{RedisViewCache, ViewCache};
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, CreateProduct, ListParams, Pagination, Product, ProductFilter, ProductPage,
    UpdateProduct,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use response::{Envelope, Message};
pub use service::ProductService;
pub use validate::{FieldError, ProductForm};

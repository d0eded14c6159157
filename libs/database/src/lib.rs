//! Database connectors for the catalog services.
//!
//! Provides connection management for the stores the catalog talks to:
//! MongoDB for the document collections and Redis for cached views.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector
//! - `redis` (default) - Redis connector
//! - `config` - `FromEnv` loading for the connection configs
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{retry, retry_with_backoff, RetryConfig};

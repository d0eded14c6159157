//! View-cache invalidation.
//!
//! A separate rendering layer caches listing and detail pages under
//! path-shaped keys. Writes to the catalog invalidate those entries so
//! the next render sees fresh data. Invalidation is best-effort: the
//! service logs failures and the write still succeeds.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::debug;
use uuid::Uuid;

use crate::error::ProductResult;

/// Cache path for the products listing page
pub const LISTING_PATH: &str = "/products-listing";

/// Cache path for a single product page
pub fn product_path(id: Uuid) -> String {
    format!("{LISTING_PATH}/{id}")
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Drop the cached view for a path, if present
    async fn invalidate(&self, path: &str) -> ProductResult<()>;
}

/// Redis-backed view cache keyed as `{prefix}:{path}`
#[derive(Clone)]
pub struct RedisViewCache {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisViewCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self::with_prefix(conn, "view")
    }

    pub fn with_prefix(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, path: &str) -> String {
        format!("{}:{}", self.prefix, path)
    }
}

#[async_trait]
impl ViewCache for RedisViewCache {
    async fn invalidate(&self, path: &str) -> ProductResult<()> {
        let key = self.key(path);
        let mut conn = self.conn.clone();
        let removed: i64 = redis::cmd("DEL").arg(&key).query_async(&mut conn).await?;
        debug!(%key, removed, "Invalidated view cache entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_path_nests_under_listing() {
        let id = Uuid::nil();
        assert_eq!(
            product_path(id),
            format!("/products-listing/{id}")
        );
    }
}

//! Redis connector
//!
//! Connection management for the view-cache store.

mod config;
mod connector;
mod health;

pub use config::RedisConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use health::check_health;

// Re-export the managed connection type callers hold on to
pub use redis::aio::ConnectionManager;

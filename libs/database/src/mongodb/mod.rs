//! MongoDB connector
//!
//! Connection management plus a ping-based health check.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use health::check_health;

// Re-export the driver types callers usually need
pub use mongodb::{Client, Collection, Database};

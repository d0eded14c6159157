//! Shared pieces used by every connector.

mod retry;

pub use retry::{retry, retry_with_backoff, RetryConfig};

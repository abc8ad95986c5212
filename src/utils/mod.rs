//! Configuration utilities.

/// Environment-driven configuration and the transport retry policy.
pub mod config;

pub use config::{Config, RetryOptions};

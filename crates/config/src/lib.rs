//! Configuration loading for the storefront client.
//!
//! Uses figment for YAML-based configuration with sensible defaults,
//! overridable from `STOREFRONT_*` environment variables.

pub mod schema;

pub use schema::{Config, LogConfig};

//! Async traits shared across all storefront crates.
//!
//! Every cross-crate abstraction is defined here so that higher layers depend
//! only on `storefront-types`, not on each other.

use crate::{ApiRequest, ApiResponse};
use async_trait::async_trait;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, crate::StorefrontError>;

/// Persistent storage for the bearer token of the current session.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any.
    async fn get_token(&self) -> Result<Option<String>>;
    /// Persist a token, replacing any previous one.
    async fn save_token(&self, token: &str) -> Result<()>;
    /// Forget the stored token (logout).
    async fn remove_token(&self) -> Result<()>;
}

/// Executes a single request against the network (or a test stand-in).
///
/// Non-2xx statuses are returned as a normal [`ApiResponse`]; only transport
/// failures are errors at this layer.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Rewrites outgoing requests before they reach the backend.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn intercept(&self, request: ApiRequest) -> Result<ApiRequest>;
}

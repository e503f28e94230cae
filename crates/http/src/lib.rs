//! HTTP plumbing shared by the catalog and auth gateways.
//!
//! [`HttpClient`] carries the configured base URL, runs the registered
//! [`RequestInterceptor`]s over every outgoing request, hands it to an
//! [`HttpBackend`] and maps non-success statuses to
//! [`StorefrontError::Upstream`].
//!
//! [`RequestInterceptor`]: storefront_types::RequestInterceptor
//! [`HttpBackend`]: storefront_types::HttpBackend
//! [`StorefrontError::Upstream`]: storefront_types::StorefrontError::Upstream

pub mod backend;
pub mod client;
pub mod interceptor;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::ReqwestBackend;
pub use client::HttpClient;
pub use interceptor::TokenInterceptor;

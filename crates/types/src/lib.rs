//! Core types and traits for the storefront workspace.
//!
//! This crate defines the shared abstractions used across all layers of the
//! catalog client: catalog entities and DTOs, the request/response envelopes,
//! the error type, and the async traits that each layer implements.

pub mod auth;
pub mod error;
#[cfg(feature = "fixtures")]
pub mod fixtures;
pub mod product;
pub mod request;
pub mod traits;

pub use auth::{Auth, Credentials, User};
pub use error::StorefrontError;
pub use product::{Category, CreateProductDto, Product, ProductWithTax, UpdateProductDto};
pub use request::{ApiRequest, ApiResponse};
pub use traits::{HttpBackend, RequestInterceptor, TokenStore};

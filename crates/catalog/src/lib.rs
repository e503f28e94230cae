//! Product catalog gateway.
//!
//! [`ProductGateway`] wraps the `/api/v1/products` resource: listing with the
//! client-side tax transform, lookups with normalized errors, and the write
//! operations. [`Calculator`] holds the arithmetic the tax transform uses.

pub mod calculator;
pub mod error;
pub mod products;

pub use calculator::Calculator;
pub use error::LookupError;
pub use products::{ProductGateway, TAX_RATE, taxes_for};

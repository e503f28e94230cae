//! Login against the catalog API and bearer-token session handling.
//!
//! [`AuthGateway`] only talks to the network; it never touches the token
//! store. [`Session`] composes the gateway with a [`TokenStore`] and is the
//! one place that persists a freshly issued token.
//!
//! [`TokenStore`]: storefront_types::TokenStore

pub mod gateway;
pub mod session;

pub use gateway::AuthGateway;
pub use session::Session;

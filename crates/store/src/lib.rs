//! Token storage backends for persisting the session's bearer token.
//!
//! Provides an in-memory store for testing and a JSON-file store for the CLI.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::InMemoryTokenStore;

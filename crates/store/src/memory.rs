//! In-memory token store backed by an `Option<String>` behind a `Mutex`.

use async_trait::async_trait;
use std::sync::Mutex;
use storefront_types::{StorefrontError, TokenStore, traits::Result};

/// An in-memory [`TokenStore`] implementation for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl InMemoryTokenStore {
    /// Creates a new empty in-memory token store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| StorefrontError::Storage("token store lock poisoned".into()))
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get_token(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    /// Saves (or overwrites) the token.
    async fn save_token(&self, token: &str) -> Result<()> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    async fn remove_token(&self) -> Result<()> {
        self.lock()?.take();
        Ok(())
    }
}

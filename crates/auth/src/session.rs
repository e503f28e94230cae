use std::sync::Arc;
use storefront_types::{Auth, Credentials, TokenStore, traits::Result};
use tracing::instrument;

use crate::AuthGateway;

/// Ties an [`AuthGateway`] to the [`TokenStore`] the request interceptor reads from.
///
/// The gateway itself never persists anything; `Session::login` is the one
/// place a freshly issued token is written to the store.
pub struct Session {
    gateway: AuthGateway,
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(gateway: AuthGateway, store: Arc<dyn TokenStore>) -> Self {
        Self { gateway, store }
    }

    #[must_use]
    pub fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    /// Logs in and saves the issued token exactly once.
    ///
    /// # Errors
    ///
    /// Returns the gateway error without touching the store, or the store
    /// error if the token could not be saved.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Auth> {
        let auth = self.gateway.login(credentials).await?;
        self.store.save_token(&auth.access_token).await?;
        tracing::info!("session token saved");
        Ok(auth)
    }

    /// Forgets the stored token. Succeeds when no token is stored.
    ///
    /// # Errors
    ///
    /// Returns the store error if the token could not be removed.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.store.remove_token().await?;
        tracing::info!("session token removed");
        Ok(())
    }

    /// Whether a non-empty token is stored. Does not check it with the server.
    ///
    /// # Errors
    ///
    /// Returns the store error if the token could not be read.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self
            .store
            .get_token()
            .await?
            .is_some_and(|t| !t.is_empty()))
    }
}

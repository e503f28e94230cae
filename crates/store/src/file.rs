//! Token store persisted as a small JSON document on disk.
//!
//! The file holds the same `{"access_token": "..."}` shape the login endpoint
//! returns. A missing file means "no token".

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use storefront_types::{Auth, TokenStore, traits::Result};

/// A [`TokenStore`] that keeps the token in a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get_token(&self) -> Result<Option<String>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let auth: Auth = serde_json::from_slice(&bytes)?;
        Ok(Some(auth.access_token))
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(&Auth::new(token))?;
        tokio::fs::write(&self.path, body).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    async fn remove_token(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

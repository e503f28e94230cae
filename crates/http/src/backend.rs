//! Network backend built on `reqwest`.

use async_trait::async_trait;
use std::time::Duration;
use storefront_types::{ApiRequest, ApiResponse, HttpBackend, traits::Result};

/// [`HttpBackend`] that performs real network I/O.
#[derive(Debug, Clone, Default)]
pub struct ReqwestBackend {
    http: reqwest::Client,
}

impl ReqwestBackend {
    /// Wraps an existing client.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Builds a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`storefront_types::StorefrontError::Http`] if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_clone() {
        let backend = ReqwestBackend::with_timeout(Duration::from_secs(5)).unwrap();
        let _backend2 = backend.clone();
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let backend = ReqwestBackend::with_timeout(Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on localhost is closed on test machines.
        let err = backend
            .execute(ApiRequest::get("http://127.0.0.1:9/api/v1/products"))
            .await
            .unwrap_err();
        assert!(matches!(err, storefront_types::StorefrontError::Http(_)));
    }
}

//! Attaches the stored bearer token to outgoing requests.

use async_trait::async_trait;
use http::{HeaderValue, header::AUTHORIZATION};
use std::sync::Arc;
use storefront_types::{ApiRequest, RequestInterceptor, StorefrontError, TokenStore, traits::Result};

/// Adds `Authorization: Bearer {token}` when the [`TokenStore`] holds a token.
///
/// Applies to every request regardless of destination. An empty token is
/// treated as absent.
pub struct TokenInterceptor {
    store: Arc<dyn TokenStore>,
}

impl TokenInterceptor {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestInterceptor for TokenInterceptor {
    async fn intercept(&self, request: ApiRequest) -> Result<ApiRequest> {
        let Some(token) = self.store.get_token().await?.filter(|t| !t.is_empty()) else {
            return Ok(request);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            StorefrontError::Auth(format!("stored token is not a valid header value: {e}"))
        })?;
        value.set_sensitive(true);
        Ok(request.header(AUTHORIZATION, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HttpClient;
    use crate::testing::testing_backend;
    use storefront_store::InMemoryTokenStore;

    #[tokio::test]
    async fn test_adds_bearer_header_when_token_present() {
        let store = Arc::new(InMemoryTokenStore::with_token("123"));
        let interceptor = TokenInterceptor::new(store);
        let req = interceptor
            .intercept(ApiRequest::get("http://api.test/api/v1/products"))
            .await
            .unwrap();
        assert_eq!(req.header_value("authorization"), Some("Bearer 123"));
    }

    #[tokio::test]
    async fn test_passes_through_without_token() {
        let interceptor = TokenInterceptor::new(Arc::new(InMemoryTokenStore::new()));
        let req = interceptor
            .intercept(ApiRequest::get("http://api.test/api/v1/products").param("limit", 1))
            .await
            .unwrap();
        assert!(req.headers.get(AUTHORIZATION).is_none());
        assert_eq!(req.param_value("limit"), Some("1"));
    }

    #[tokio::test]
    async fn test_empty_token_is_ignored() {
        let interceptor = TokenInterceptor::new(Arc::new(InMemoryTokenStore::with_token("")));
        let req = interceptor
            .intercept(ApiRequest::get("http://api.test"))
            .await
            .unwrap();
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_invalid_token_is_auth_error() {
        let interceptor =
            TokenInterceptor::new(Arc::new(InMemoryTokenStore::with_token("bad\ntoken")));
        let err = interceptor
            .intercept(ApiRequest::get("http://api.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Auth(_)));
    }

    #[tokio::test]
    async fn test_token_is_read_per_request() {
        let store = Arc::new(InMemoryTokenStore::new());
        let (backend, mut controller) = testing_backend();
        let client = HttpClient::new("http://api.test", Arc::new(backend))
            .with_interceptor(Arc::new(TokenInterceptor::new(store.clone())));

        let (first, ()) = tokio::join!(client.send(ApiRequest::get(client.endpoint("/a"))), async {
            let req = controller.expect_one("http://api.test/a").await;
            assert!(req.request.headers.get(AUTHORIZATION).is_none());
            req.flush(&true);
        });
        first.unwrap();

        store.save_token("fresh").await.unwrap();
        let (second, ()) = tokio::join!(client.send(ApiRequest::get(client.endpoint("/b"))), async {
            let req = controller.expect_one("http://api.test/b").await;
            assert_eq!(req.request.header_value("authorization"), Some("Bearer fresh"));
            req.flush(&true);
        });
        second.unwrap();
        controller.verify();
    }
}

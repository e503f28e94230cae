use serde::de::DeserializeOwned;
use std::sync::Arc;
use storefront_types::{
    ApiRequest, ApiResponse, HttpBackend, RequestInterceptor, StorefrontError, traits::Result,
};

/// Configured HTTP client injected into every gateway.
///
/// Cloning is cheap; clones share the backend and interceptors.
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    backend: Arc<dyn HttpBackend>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl HttpClient {
    /// Creates a client rooted at `base_url` (a trailing `/` is ignored).
    pub fn new(base_url: impl Into<String>, backend: Arc<dyn HttpBackend>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            backend,
            interceptors: Vec::new(),
        }
    }

    /// Registers an interceptor. Interceptors run in registration order.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/v1/products`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Intercepts and sends a request, checking for success status.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Upstream`] on non-2xx responses, or whatever
    /// an interceptor or the backend reports.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut request = request;
        for interceptor in &self.interceptors {
            request = interceptor.intercept(request).await?;
        }

        let method = request.method.clone();
        let url = request.url_with_params();
        tracing::debug!(%method, %url, "sending request");

        let resp = self.backend.execute(request).await?;
        if resp.is_success() {
            Ok(resp)
        } else {
            tracing::warn!(%method, %url, status = resp.status.as_u16(), "request failed");
            Err(StorefrontError::Upstream {
                status: resp.status.as_u16(),
                body: resp.text(),
            })
        }
    }

    /// Sends a request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::send`], plus [`StorefrontError::Serialization`]
    /// if the body does not decode as `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::testing_backend;
    use async_trait::async_trait;
    use http::{HeaderValue, StatusCode};

    struct Tag(&'static str);

    #[async_trait]
    impl RequestInterceptor for Tag {
        async fn intercept(&self, request: ApiRequest) -> Result<ApiRequest> {
            let seen = request.header_value("x-trace").unwrap_or_default().to_string();
            Ok(request.header(
                http::header::HeaderName::from_static("x-trace"),
                HeaderValue::from_str(&format!("{seen}{}", self.0)).unwrap(),
            ))
        }
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let (backend, _controller) = testing_backend();
        let client = HttpClient::new("http://api.test/", Arc::new(backend));
        assert_eq!(client.base_url(), "http://api.test");
        assert_eq!(
            client.endpoint("/api/v1/products"),
            "http://api.test/api/v1/products"
        );
        assert_eq!(
            client.endpoint("api/v1/products"),
            "http://api.test/api/v1/products"
        );
    }

    #[tokio::test]
    async fn test_send_success_decodes_json() {
        let (backend, mut controller) = testing_backend();
        let client = HttpClient::new("http://api.test", Arc::new(backend));
        let (result, ()) = tokio::join!(
            client.send_json::<Vec<u32>>(ApiRequest::get(client.endpoint("/numbers"))),
            async {
                controller
                    .expect_one("http://api.test/numbers")
                    .await
                    .flush(&[1, 2, 3]);
            }
        );
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
        controller.verify();
    }

    #[tokio::test]
    async fn test_non_success_becomes_upstream() {
        let (backend, mut controller) = testing_backend();
        let client = HttpClient::new("http://api.test", Arc::new(backend));
        let (result, ()) = tokio::join!(client.send(ApiRequest::get(client.endpoint("/x"))), async {
            controller
                .expect_one("http://api.test/x")
                .await
                .flush_error(StatusCode::NOT_FOUND, "404 message");
        });
        match result.unwrap_err() {
            StorefrontError::Upstream { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "404 message");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_interceptors_run_in_order() {
        let (backend, mut controller) = testing_backend();
        let client = HttpClient::new("http://api.test", Arc::new(backend))
            .with_interceptor(Arc::new(Tag("a")))
            .with_interceptor(Arc::new(Tag("b")));
        let (result, ()) = tokio::join!(client.send(ApiRequest::get(client.endpoint("/x"))), async {
            let req = controller.expect_one("http://api.test/x").await;
            assert_eq!(req.request.header_value("x-trace"), Some("ab"));
            req.flush(&true);
        });
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let (backend, mut controller) = testing_backend();
        let client = HttpClient::new("http://api.test", Arc::new(backend));
        let (result, ()) = tokio::join!(client.send(ApiRequest::get(client.endpoint("/x"))), async {
            controller
                .expect_one("http://api.test/x")
                .await
                .fail(StorefrontError::Http("connection refused".into()));
        });
        assert!(matches!(result.unwrap_err(), StorefrontError::Http(_)));
    }
}

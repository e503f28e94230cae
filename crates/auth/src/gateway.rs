//! Network calls to the `/api/v1/auth` resource.

use storefront_http::HttpClient;
use storefront_types::{ApiRequest, Auth, Credentials, User, traits::Result};
use tracing::instrument;

/// Login endpoint path.
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Profile endpoint path.
pub const PROFILE_PATH: &str = "/api/v1/auth/profile";

/// Stateless gateway for login and the current user's profile.
#[derive(Clone)]
pub struct AuthGateway {
    client: HttpClient,
}

impl AuthGateway {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for an access token.
    ///
    /// The token is returned as-is; persisting it is the caller's job.
    ///
    /// # Errors
    ///
    /// Propagates transport, upstream and decoding errors unmodified.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Auth> {
        let request = ApiRequest::post(self.client.endpoint(LOGIN_PATH)).body(credentials.login_body());
        let auth: Auth = self.client.send_json(request).await?;
        tracing::debug!("login succeeded");
        Ok(auth)
    }

    /// Fetches the profile of the user the current bearer token belongs to.
    ///
    /// # Errors
    ///
    /// Propagates transport, upstream and decoding errors unmodified.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User> {
        self.client
            .send_json(ApiRequest::get(self.client.endpoint(PROFILE_PATH)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};
    use serde_json::json;
    use std::sync::Arc;
    use storefront_http::TokenInterceptor;
    use storefront_http::testing::{TestingController, testing_backend};
    use storefront_store::InMemoryTokenStore;
    use storefront_types::{StorefrontError, TokenStore};

    const API: &str = "http://api.test";

    fn make_gateway(store: Arc<InMemoryTokenStore>) -> (AuthGateway, TestingController) {
        let (backend, controller) = testing_backend();
        let client = HttpClient::new(API, Arc::new(backend))
            .with_interceptor(Arc::new(TokenInterceptor::new(store)));
        (AuthGateway::new(client), controller)
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let (gateway, mut controller) = make_gateway(Arc::new(InMemoryTokenStore::new()));
        let mock = Auth::new("123456");
        let credentials = Credentials::new("email@email.com", "1234");

        let (result, ()) = tokio::join!(gateway.login(&credentials), async {
            let req = controller.expect_one(&format!("{API}/api/v1/auth/login")).await;
            assert_eq!(req.request.method, Method::POST);
            assert_eq!(
                req.request.body,
                Some(json!({"email": "email@email.com", "password": "1234"}))
            );
            req.flush(&mock);
        });

        assert_eq!(result.unwrap(), mock);
        controller.verify();
    }

    #[tokio::test]
    async fn test_login_does_not_touch_store() {
        let store = Arc::new(InMemoryTokenStore::new());
        let (gateway, mut controller) = make_gateway(store.clone());
        let credentials = Credentials::new("email@email.com", "1234");

        let (result, ()) = tokio::join!(gateway.login(&credentials), async {
            controller
                .expect_one(&format!("{API}/api/v1/auth/login"))
                .await
                .flush(&Auth::new("123456"));
        });

        result.unwrap();
        assert!(store.get_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_unauthorized_propagates_upstream() {
        let (gateway, mut controller) = make_gateway(Arc::new(InMemoryTokenStore::new()));
        let credentials = Credentials::new("email@email.com", "wrong");

        let (result, ()) = tokio::join!(gateway.login(&credentials), async {
            controller
                .expect_one(&format!("{API}/api/v1/auth/login"))
                .await
                .flush_error(StatusCode::UNAUTHORIZED, "Unauthorized");
        });

        assert!(matches!(
            result.unwrap_err(),
            StorefrontError::Upstream { status: 401, .. }
        ));
    }

    #[tokio::test]
    async fn test_profile_sends_bearer_token() {
        let store = Arc::new(InMemoryTokenStore::with_token("123456"));
        let (gateway, mut controller) = make_gateway(store);

        let (result, ()) = tokio::join!(gateway.profile(), async {
            let req = controller.expect_one(&format!("{API}/api/v1/auth/profile")).await;
            assert_eq!(req.request.method, Method::GET);
            assert_eq!(req.request.header_value("authorization"), Some("Bearer 123456"));
            req.flush(&json!({"id": 1, "email": "email@email.com", "name": "Nico"}));
        });

        let user = result.unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.name, "Nico");
    }
}

//! In-process backend for testing gateways without a network.
//!
//! [`testing_backend`] returns a [`TestingBackend`] to hand to an
//! [`crate::HttpClient`] and a [`TestingController`] that receives every
//! request the client sends. The test asserts on the request, then answers it
//! with [`PendingRequest::flush`] or [`PendingRequest::flush_error`].
//!
//! Drive the gateway call and the controller concurrently, e.g. with
//! `tokio::join!`:
//!
//! ```ignore
//! let (backend, mut controller) = testing_backend();
//! let client = HttpClient::new("http://api.test", Arc::new(backend));
//! let (result, ()) = tokio::join!(client.send_json::<bool>(req), async {
//!     controller.expect_one("http://api.test/api/v1/products/1").await.flush(&true);
//! });
//! controller.verify();
//! ```

use async_trait::async_trait;
use http::StatusCode;
use serde::Serialize;
use std::time::Duration;
use storefront_types::{ApiRequest, ApiResponse, HttpBackend, StorefrontError, traits::Result};
use tokio::sync::{mpsc, oneshot};

/// How long [`TestingController::expect_one`] waits for a request to arrive.
const EXPECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A request captured by the testing backend, waiting for a response.
#[derive(Debug)]
pub struct PendingRequest {
    pub request: ApiRequest,
    respond_to: oneshot::Sender<Result<ApiResponse>>,
}

impl PendingRequest {
    /// Answers with `200 OK` and `body` encoded as JSON.
    ///
    /// # Panics
    ///
    /// Panics if `body` cannot be serialized.
    pub fn flush<T: Serialize + ?Sized>(self, body: &T) {
        let bytes = serde_json::to_vec(body).expect("flush body must serialize");
        self.respond(StatusCode::OK, bytes);
    }

    /// Answers with a non-success status and a plain-text body.
    pub fn flush_error(self, status: StatusCode, body: &str) {
        self.respond(status, body.as_bytes().to_vec());
    }

    /// Fails the request at the transport level.
    pub fn fail(self, err: StorefrontError) {
        let _ = self.respond_to.send(Err(err));
    }

    fn respond(self, status: StatusCode, body: Vec<u8>) {
        let _ = self.respond_to.send(Ok(ApiResponse::new(status, body)));
    }
}

/// [`HttpBackend`] that forwards every request to a [`TestingController`].
#[derive(Debug, Clone)]
pub struct TestingBackend {
    sender: mpsc::UnboundedSender<PendingRequest>,
}

#[async_trait]
impl HttpBackend for TestingBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PendingRequest {
                request,
                respond_to,
            })
            .map_err(|_| StorefrontError::Http("testing controller dropped".into()))?;
        response
            .await
            .map_err(|_| StorefrontError::Http("request was never answered".into()))?
    }
}

/// Receives requests sent through a [`TestingBackend`].
#[derive(Debug)]
pub struct TestingController {
    receiver: mpsc::UnboundedReceiver<PendingRequest>,
}

impl TestingController {
    /// Waits for the next request and asserts its full URL (query string
    /// included) equals `url`.
    ///
    /// # Panics
    ///
    /// Panics if no request arrives in time or the URL does not match.
    pub async fn expect_one(&mut self, url: &str) -> PendingRequest {
        let pending = tokio::time::timeout(EXPECT_TIMEOUT, self.receiver.recv())
            .await
            .unwrap_or_else(|_| panic!("expected one request for {url}, found none"))
            .unwrap_or_else(|| panic!("expected one request for {url}, backend was dropped"));
        assert_eq!(
            pending.request.url_with_params(),
            url,
            "expected one request for {url}"
        );
        pending
    }

    /// Asserts that no request is left unanswered.
    ///
    /// # Panics
    ///
    /// Panics if a request was sent that no `expect_one` consumed.
    pub fn verify(&mut self) {
        if let Ok(pending) = self.receiver.try_recv() {
            panic!(
                "unexpected request: {} {}",
                pending.request.method,
                pending.request.url_with_params()
            );
        }
    }
}

/// Creates a connected backend/controller pair.
#[must_use]
pub fn testing_backend() -> (TestingBackend, TestingController) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (TestingBackend { sender }, TestingController { receiver })
}

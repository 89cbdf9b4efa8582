//! # API client
//!
//! [`ApiClient`] is the single path for application API calls (reports, uploads,
//! profile, ...). It sends every request credentialed, logs request and response
//! metadata, and hands each response status to the registered
//! [`ResponseInterceptor`]s before the caller sees the result. The session crate
//! registers an interceptor that turns 401/403 into a forced logout.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{credentialed, ApiError, Settings};

/// Observer of every request/response passing through [`ApiClient`].
pub trait ResponseInterceptor: Send + Sync {
    fn on_request(&self, _method: &Method, _url: &str) {}

    /// Runs before the response is returned (or turned into an error) to the caller.
    fn on_response(&self, status: StatusCode, url: &str);
}

/// Intercepted, credentialed HTTP client for the gateway's API routes.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    settings: Arc<Settings>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("gateway_url", &self.settings.gateway_url)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl ApiClient {
    pub fn new(settings: Arc<Settings>, http: reqwest::Client) -> Self {
        Self {
            http,
            settings,
            interceptors: Vec::new(),
        }
    }

    /// Register an interceptor; they run in registration order.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None).await?.json_body().await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_json(body)?;
        self.send(Method::POST, path, Some(body))
            .await?
            .json_body()
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_json(body)?;
        self.send(Method::PUT, path, Some(body)).await?.json_body().await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_json(body)?;
        self.send(Method::PATCH, path, Some(body))
            .await?
            .json_body()
            .await
    }

    /// DELETE, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Send a request through the interceptors. Non-2xx statuses become
    /// [`ApiError::Status`] after the interceptors have seen them.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.settings.endpoint(path);
        tracing::debug!("API request: {} {}", method, url);
        for interceptor in &self.interceptors {
            interceptor.on_request(&method, &url);
        }

        let mut request = credentialed(self.http.request(method, &url))
            .timeout(Duration::from_secs(self.settings.request_timeout_secs));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("API request to {} failed: {}", url, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::debug!("API response: {} {}", status.as_u16(), url);
        } else {
            tracing::warn!("API error: {} {}", status.as_u16(), url);
        }
        for interceptor in &self.interceptors {
            interceptor.on_response(status, &url);
        }

        if status.is_success() {
            Ok(ApiResponse { inner: response })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status_body(status.as_u16(), &body))
        }
    }
}

/// Successful response returned by [`ApiClient::send`].
#[derive(Debug)]
pub struct ApiResponse {
    inner: reqwest::Response,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub async fn json_body<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        self.inner
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn text(self) -> Result<String, ApiError> {
        Ok(self.inner.text().await?)
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::spawn_gateway;
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        requests: Mutex<Vec<String>>,
        statuses: Mutex<Vec<u16>>,
    }

    impl ResponseInterceptor for Recorder {
        fn on_request(&self, method: &Method, url: &str) {
            self.requests.lock().push(format!("{method} {url}"));
        }

        fn on_response(&self, status: StatusCode, _url: &str) {
            self.statuses.lock().push(status.as_u16());
        }
    }

    #[tokio::test]
    async fn test_interceptor_sees_every_status() {
        let server = spawn_gateway().await;
        let recorder = Arc::new(Recorder::default());
        let client =
            ApiClient::new(server.settings(), server.client()).with_interceptor(recorder.clone());

        let err = client
            .get::<serde_json::Value>("/api/reports")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));

        server.sign_in().await;
        let reports: serde_json::Value = client.get("/api/reports").await.unwrap();
        assert_eq!(reports[0]["title"], "TCFD 2025");

        let err = client
            .get::<serde_json::Value>("/api/forbidden")
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(err.message(), "insufficient scope");

        assert_eq!(*recorder.statuses.lock(), vec![401, 200, 403]);
        let requests = recorder.requests.lock();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].starts_with("GET http://127.0.0.1:"));
        assert!(requests[0].ends_with("/api/reports"));
    }

    #[tokio::test]
    async fn test_error_body_is_preserved() {
        let server = spawn_gateway().await;
        let client = ApiClient::new(server.settings(), server.client());

        let err = client
            .get::<serde_json::Value>("/api/broken")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                message: Some("boom".to_string()),
                code: Some("E500".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_json_verbs() {
        let server = spawn_gateway().await;
        let client = ApiClient::new(server.settings(), server.client());
        let body = json!({ "scope": 1, "value": 12.5 });

        let posted: serde_json::Value = client.post("/api/echo", &body).await.unwrap();
        assert_eq!(posted["echo"], body);

        let put: serde_json::Value = client.put("/api/echo", &body).await.unwrap();
        assert_eq!(put["echo"]["scope"], 1);

        let patched: serde_json::Value = client.patch("/api/echo", &body).await.unwrap();
        assert_eq!(patched["echo"]["value"], 12.5);

        client.delete("/api/reports/1").await.unwrap();
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let server = spawn_gateway().await;
        let recorder = Arc::new(Recorder::default());
        let client = ApiClient::new(
            server.settings_with("", "request_timeout_secs = 1"),
            server.client(),
        )
        .with_interceptor(recorder.clone());

        let started = std::time::Instant::now();
        let err = client
            .get::<serde_json::Value>("/api/stalled")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
        assert_eq!(err.message(), "Unable to reach the server.");
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(recorder.statuses.lock().is_empty());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let server = spawn_gateway().await;
        let client = ApiClient::new(server.settings(), server.client());
        server.sign_in().await;

        let err = client.get::<Vec<u32>>("/api/reports").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    }
}

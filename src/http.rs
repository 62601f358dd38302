use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::prefs::Prefs;

// One connection pool shared by every client instance.
static SHARED_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Default per-request deadline. Expiry aborts the in-flight request; this
/// is the only cancellation mechanism the helper exposes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Successful response envelope: parsed body plus the status it came with.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub status: u16,
}

/// Generic access helper: uniform request/response handling with timeout
/// and the typed error taxonomy, decoupled from any specific resource.
#[derive(Clone)]
pub struct HttpClient {
    base: String,
    inner: reqwest::Client,
    prefs: Prefs,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(base: impl Into<String>, prefs: Prefs) -> Self {
        Self::with_timeout(base, prefs, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base: impl Into<String>, prefs: Prefs, timeout: Duration) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            base,
            inner: SHARED_CLIENT.clone(),
            prefs,
            timeout,
        }
    }

    /// Backend base URL (env override for local/mock setups).
    pub fn api_base_from_env() -> String {
        std::env::var("AURORA_API_BASE").unwrap_or_else(|_| "http://localhost:3001".into())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Perform a request and classify the outcome.
    ///
    /// 2xx bodies are parsed as JSON when the content type says JSON, and
    /// returned as a raw text value otherwise. Everything else maps onto
    /// the [`ApiError`] taxonomy; a malformed JSON body is a `Parse` error,
    /// never silently swallowed.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<Fetched<serde_json::Value>> {
        let url = self.url(path);
        let mut req = self
            .inner
            .request(method.clone(), &url)
            .timeout(self.timeout)
            .header(ACCEPT_LANGUAGE, self.prefs.locale().as_tag());
        if let Some(b) = body {
            req = req.json(&b);
        }

        // Race the whole send against the deadline; expiry drops (and thereby
        // aborts) the in-flight request.
        let resp = match tokio::time::timeout(self.timeout, req.send()).await {
            Ok(Ok(r)) => r,
            Ok(Err(e)) => {
                warn!(%url, %method, "request failed: {e}");
                return Err(ApiError::from_transport(e, self.timeout));
            }
            Err(_) => {
                warn!(%url, %method, timeout = ?self.timeout, "request timed out");
                return Err(ApiError::Timeout(self.timeout));
            }
        };

        let status = resp.status();
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("json"))
            .unwrap_or(false);
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout))?;

        if status.is_success() {
            let data = if is_json {
                serde_json::from_str(&text).map_err(|e| {
                    warn!(%url, "malformed JSON body: {e}");
                    ApiError::Parse(e.to_string())
                })?
            } else {
                serde_json::Value::String(text)
            };
            debug!(%url, %method, status = status.as_u16(), "request ok");
            return Ok(Fetched {
                data,
                status: status.as_u16(),
            });
        }

        warn!(%url, %method, status = status.as_u16(), "request rejected");
        if status.is_server_error() {
            Err(ApiError::Server {
                status: status.as_u16(),
                body: text,
            })
        } else if status.is_client_error() {
            Err(ApiError::Client {
                status: status.as_u16(),
                body: text,
            })
        } else {
            Err(ApiError::Unknown(format!("unexpected status {status}")))
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let fetched = self.request(Method::GET, path, None).await?;
        serde_json::from_value(fetched.data).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> ApiResult<T> {
        let fetched = self.request(Method::POST, path, Some(body)).await?;
        serde_json::from_value(fetched.data).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> ApiResult<T> {
        let fetched = self.request(Method::PUT, path, Some(body)).await?;
        serde_json::from_value(fetched.data).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Fetched<serde_json::Value>> {
        self.request(Method::DELETE, path, None).await
    }
}

//! Request dispatch against the ForceWeaver API.
//!
//! Builds the outbound request from a tool call's parameters, separating the
//! credential (Authorization header) from the payload (JSON body), and hands
//! the completed response to the classifier.

use crate::classify::classify_response;
use crate::error::{ApiError, Result};
use crate::session::SessionManager;
use reqwest::Method;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

/// Parameter key carrying the credential in a tool call. Extracted before the
/// request is built; it never reaches the body or query string.
pub const API_KEY_PARAM: &str = "forceweaver_api_key";

/// Fixed query marker asking the service for AI-friendly formatted output.
const FORMAT_QUERY: &str = "format=mcp";

/// API path version prefix. Distinct from the Salesforce `api_version`
/// parameter, which travels in the request body.
const API_PATH_VERSION: &str = "v1.0";

/// Client for ForceWeaver cloud services.
///
/// Owns the shared HTTP session; one instance lives at the process's
/// composition root and is shared by every tool.
pub struct ApiClient {
    base_url: String,
    sessions: SessionManager,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, crate::session::DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            sessions: SessionManager::with_timeout(timeout),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Release the shared HTTP session. Called once at process shutdown.
    pub fn close(&self) {
        self.sessions.release();
    }

    /// Call a ForceWeaver API endpoint and classify the outcome.
    ///
    /// The credential is taken from `params[API_KEY_PARAM]` and attached as a
    /// bearer token; the remaining params are sent as the JSON body (no body
    /// for `GET`).
    ///
    /// # Errors
    ///
    /// - `AuthenticationFailed` if the credential is missing or empty (local
    ///   check; no network call is made).
    /// - `Timeout` if the request exceeds the overall timeout.
    /// - `ConnectionFailed` for transport-level failures.
    /// - Any classifier failure for completed responses (see
    ///   [`classify_response`](crate::classify::classify_response)).
    pub async fn dispatch(
        &self,
        endpoint: &str,
        method: Method,
        mut params: Map<String, Value>,
    ) -> Result<String> {
        let api_key = match params.remove(API_KEY_PARAM) {
            Some(Value::String(key)) if !key.is_empty() => key,
            _ => {
                tracing::error!(endpoint, "missing API key in request");
                return Err(ApiError::AuthenticationFailed(
                    "ForceWeaver API key is required".to_string(),
                ));
            }
        };

        let url = format!(
            "{}/api/{API_PATH_VERSION}/{endpoint}?{FORMAT_QUERY}",
            self.base_url
        );

        let client = self.sessions.acquire()?;
        tracing::info!(endpoint, method = %method, "calling ForceWeaver API");
        let started = Instant::now();

        let mut request = client.request(method.clone(), &url).bearer_auth(api_key);
        if method != Method::GET {
            request = request.json(&params);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        tracing::info!(
            endpoint,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API call completed"
        );

        classify_response(status, &body)
    }
}

fn map_transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::ConnectionFailed(sanitize_reqwest_error(&e))
}

/// Strip credentials, query, and fragment from any URL embedded in a reqwest
/// error message.
fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(u) = e.url() {
        msg = msg.replace(u.as_str(), &redact_url(u));
    }
    msg
}

fn redact_url(url: &reqwest::Url) -> String {
    let mut u = url.clone();
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

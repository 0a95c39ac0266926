//! HTTP response classification.
//!
//! Maps status code + body shape to either the success payload text or one of
//! the typed failures in [`ApiError`]. Messages are written to be directly
//! actionable: each says why the call failed and where to fix it.

use crate::error::{ApiError, Result};
use reqwest::StatusCode;
use serde_json::Value;

const AUTHENTICATION_FAILED: &str = "\u{274c} Authentication Failed\n\n\
    Your ForceWeaver API key is invalid or expired.\n\
    Please check your key at: https://mcp.forceweaver.com/dashboard/keys";

const ACCESS_DENIED: &str = "\u{274c} Access Denied\n\n\
    Your subscription doesn't include this feature.\n\
    Upgrade at: https://mcp.forceweaver.com/dashboard/billing";

const RATE_LIMITED: &str = "\u{274c} Rate Limited\n\n\
    You've exceeded your usage limits.\n\
    Check your usage at: https://mcp.forceweaver.com/dashboard/usage";

const ORG_NOT_FOUND: &str = "\u{274c} Salesforce Org Not Found\n\n\
    The specified Salesforce org was not found in your account.\n\
    Add it at: https://mcp.forceweaver.com/dashboard/orgs";

/// Classify a completed API response into a success payload or a typed
/// failure.
///
/// # Errors
///
/// Returns the [`ApiError`] variant corresponding to the HTTP status (and, for
/// 200 responses, the body shape); see the status table in the crate docs.
pub fn classify_response(status: StatusCode, body: &str) -> Result<String> {
    match status.as_u16() {
        200 => classify_ok_body(body),
        401 => Err(ApiError::AuthenticationFailed(
            AUTHENTICATION_FAILED.to_string(),
        )),
        403 => Err(ApiError::AccessDenied(ACCESS_DENIED.to_string())),
        429 => Err(ApiError::RateLimited(RATE_LIMITED.to_string())),
        404 => Err(ApiError::NotFound(ORG_NOT_FOUND.to_string())),
        other => Err(ApiError::ServiceError(format!(
            "\u{274c} Service Error (HTTP {other})\n\n{body}\n\n\
             Contact support: https://mcp.forceweaver.com/support"
        ))),
    }
}

fn classify_ok_body(body: &str) -> Result<String> {
    let result: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Unexpected(format!("Invalid JSON in API response: {e}")))?;

    // Preferred: the AI-formatted report produced by `?format=mcp`.
    if let Some(formatted) = result.get("formatted_output") {
        return Ok(value_to_text(formatted));
    }

    if result.get("success").and_then(Value::as_bool) == Some(true) {
        let payload = result.get("data").unwrap_or(&result);
        return Ok(value_to_text(payload));
    }

    // 200 with neither payload shape: the service reported a failure in-band.
    let message = result
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error");
    Err(ApiError::ServiceError(format!("API Error: {message}")))
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

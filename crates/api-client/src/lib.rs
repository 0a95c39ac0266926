//! HTTP adapter for the ForceWeaver Revenue Cloud health-checking service.
//!
//! This crate is the request/response translation layer used by
//! `forceweaver-mcp-client`: it owns the pooled HTTP session, builds outbound
//! requests (credential in the Authorization header, everything else in the
//! body), and classifies responses into a closed set of typed failures.
//!
//! Status-to-outcome mapping:
//!
//! | Status | Outcome |
//! |---|---|
//! | 200 | `formatted_output` text, else stringified `data`, else `ServiceError` |
//! | 401 | `AuthenticationFailed` |
//! | 403 | `AccessDenied` |
//! | 429 | `RateLimited` |
//! | 404 | `NotFound` |
//! | other | `ServiceError` (raw body + support contact) |
//!
//! No retries are attempted at this layer; a single failed attempt is
//! reported as a typed failure and the caller decides whether to retry.

pub mod classify;
pub mod dispatch;
pub mod error;
pub mod session;

pub use dispatch::{API_KEY_PARAM, ApiClient};
pub use error::{ApiError, Result};
pub use session::SessionManager;

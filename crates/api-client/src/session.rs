//! Shared HTTP session management.
//!
//! A single pooled `reqwest::Client` is lazily created on first use and reused
//! across all tool invocations for the lifetime of the process. `release`
//! drops it (closing pooled connections); a later `acquire` creates a fresh
//! one.

use crate::error::{ApiError, Result};
use parking_lot::RwLock;
use std::time::Duration;

/// Identifying user-agent sent on every outbound request.
pub const USER_AGENT: &str = concat!("ForceWeaver-MCP-Client/", env!("CARGO_PKG_VERSION"));

/// Overall per-request timeout. Health checks can be slow on large orgs.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Cap on pooled connections kept per host.
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// How long an idle pooled connection may be reused before being re-resolved
/// and re-established.
const POOL_IDLE_TTL: Duration = Duration::from_secs(300);

pub struct SessionManager {
    slot: RwLock<Slot>,
    timeout: Duration,
}

struct Slot {
    client: Option<reqwest::Client>,
    generation: u64,
}

impl SessionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            slot: RwLock::new(Slot {
                client: None,
                generation: 0,
            }),
            timeout,
        }
    }

    /// Return the shared client, creating it on first use.
    ///
    /// Safe to call repeatedly; an existing open session is always reused
    /// (`reqwest::Client` clones share the underlying pool).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unexpected` if the TLS-backed client cannot be
    /// built.
    pub fn acquire(&self) -> Result<reqwest::Client> {
        if let Some(client) = self.slot.read().client.clone() {
            return Ok(client);
        }

        let mut slot = self.slot.write();
        // Re-check under the write lock; another caller may have won the race.
        if let Some(client) = slot.client.clone() {
            return Ok(client);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(POOL_IDLE_TTL)
            .build()
            .map_err(|e| ApiError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        slot.client = Some(client.clone());
        slot.generation += 1;
        Ok(client)
    }

    /// Close the session if open. Idempotent if already closed or never
    /// created.
    pub fn release(&self) {
        self.slot.write().client = None;
    }

    /// Whether an open session currently exists.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.read().client.is_some()
    }

    /// Monotonic counter incremented each time a fresh client is created.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_reuses_existing_session() {
        let sessions = SessionManager::new();
        assert!(!sessions.is_active());

        sessions.acquire().expect("first acquire");
        let first = sessions.generation();
        sessions.acquire().expect("second acquire");

        assert_eq!(sessions.generation(), first, "no duplicate creation");
        assert!(sessions.is_active());
    }

    #[test]
    fn release_is_idempotent_and_acquire_recreates() {
        let sessions = SessionManager::new();
        sessions.acquire().expect("acquire");
        let first = sessions.generation();

        sessions.release();
        assert!(!sessions.is_active());
        // Releasing an already-closed session is a no-op.
        sessions.release();

        sessions.acquire().expect("acquire after release");
        assert_eq!(sessions.generation(), first + 1, "fresh session created");
    }
}

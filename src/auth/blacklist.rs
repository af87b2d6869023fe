/// Token Blacklist
///
/// Process-local record of revoked access tokens, keyed by the `jti` claim.
/// Shared by every worker of one server process; a deployment running several
/// processes needs an external store instead.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct TokenBlacklist {
    /// jti -> token expiry (Unix timestamp)
    revoked: Arc<Mutex<HashMap<String, i64>>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, i64>> {
        // The map stays consistent even if a holder panicked.
        self.revoked.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Revoke a token until its own expiry.
    ///
    /// Entries for tokens that have already expired are dropped on the way,
    /// since JWT validation rejects those regardless.
    pub fn revoke(&self, jti: &str, expires_at: i64) {
        let purged = self.purge_expired(Utc::now().timestamp());
        if purged > 0 {
            tracing::debug!(purged, "Dropped expired blacklist entries");
        }
        self.entries().insert(jti.to_string(), expires_at);
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.entries().contains_key(jti)
    }

    /// Remove entries whose token expired before `now`. Returns how many were removed.
    pub fn purge_expired(&self, now: i64) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, exp| *exp >= now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

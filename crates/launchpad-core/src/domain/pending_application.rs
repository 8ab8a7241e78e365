//! Application form parked across a login/register redirect

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use launchpad_shared::FormData;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingApplication {
    /// sha-256 of the handoff token handed to the visitor
    pub token_digest: String,
    pub form_data: FormData,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingApplication {
    pub fn new(token_digest: String, form_data: FormData, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            token_digest,
            form_data,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

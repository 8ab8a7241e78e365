// ============================================================================
// Launchpad Infrastructure - In-Memory Parked Application Store
// File: crates/launchpad-infrastructure/src/memory/pending_application_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use launchpad_core::domain::PendingApplication;
use launchpad_core::error::DomainError;
use launchpad_core::repositories::PendingApplicationRepository;

/// Parked forms keyed by token digest
#[derive(Default)]
pub struct MemoryPendingApplicationRepository {
    entries: DashMap<String, PendingApplication>,
}

impl MemoryPendingApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PendingApplicationRepository for MemoryPendingApplicationRepository {
    async fn save(&self, pending: &PendingApplication) -> Result<(), DomainError> {
        self.entries.insert(pending.token_digest.clone(), pending.clone());
        Ok(())
    }

    async fn take(&self, token_digest: &str) -> Result<Option<PendingApplication>, DomainError> {
        Ok(self.entries.remove(token_digest).map(|(_, p)| p))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let before = self.entries.len();
        self.entries.retain(|_, p| !p.is_expired_at(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!("Purged {} expired parked applications", removed);
        }
        Ok(removed)
    }
}

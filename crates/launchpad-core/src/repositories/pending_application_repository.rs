//! Parked application repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::domain::PendingApplication;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PendingApplicationRepository: Send + Sync {
    async fn save(&self, pending: &PendingApplication) -> Result<(), DomainError>;
    /// Remove and return the entry, so a token can be claimed at most once
    async fn take(&self, token_digest: &str) -> Result<Option<PendingApplication>, DomainError>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}

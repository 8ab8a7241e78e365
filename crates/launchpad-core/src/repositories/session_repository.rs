//! Session repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use launchpad_security::Session;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Session>, DomainError>;
    /// Returns whether a session was removed
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}

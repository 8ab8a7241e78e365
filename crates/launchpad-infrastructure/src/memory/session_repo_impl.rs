// ============================================================================
// Launchpad Infrastructure - In-Memory Session Repository
// File: crates/launchpad-infrastructure/src/memory/session_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use launchpad_core::error::DomainError;
use launchpad_core::repositories::SessionRepository;
use launchpad_security::Session;

#[derive(Default)]
pub struct MemorySessionRepository {
    sessions: DashMap<Uuid, Session>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create(&self, session: &Session) -> Result<Session, DomainError> {
        self.sessions.insert(session.id, session.clone());
        Ok(session.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.get(id).map(|s| s.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.sessions.remove(id).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired_at(now));
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!("Purged {} expired sessions", removed);
        }
        Ok(removed)
    }
}

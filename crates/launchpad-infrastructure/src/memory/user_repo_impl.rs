// ============================================================================
// Launchpad Infrastructure - In-Memory User Repository
// File: crates/launchpad-infrastructure/src/memory/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use launchpad_core::domain::User;
use launchpad_core::error::DomainError;
use launchpad_core::repositories::UserRepository;
use launchpad_shared::utils::normalize_email;

/// Users keyed by id, with a normalized-email index that enforces uniqueness
#[derive(Default)]
pub struct MemoryUserRepository {
    users: DashMap<Uuid, User>,
    by_email: DashMap<String, Uuid>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let id = match self.by_email.get(&normalize_email(email)) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let email = normalize_email(&user.email);

        // Claiming the index slot first makes concurrent registrations race on
        // a single shard lock.
        match self.by_email.entry(email.clone()) {
            Entry::Occupied(_) => {
                warn!("Duplicate registration for an existing email");
                return Err(DomainError::EmailAlreadyExists(email));
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }

        self.users.insert(user.id, user.clone());
        debug!("Stored user {}", user.id);
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut stored = self
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::not_found("User", user.id))?;

        if normalize_email(&stored.email) != normalize_email(&user.email) {
            return Err(DomainError::InvalidState(
                "email addresses cannot be changed".to_string(),
            ));
        }

        *stored = user.clone();
        Ok(user.clone())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.users.iter().map(|r| r.value().clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

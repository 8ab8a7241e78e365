//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::User;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    /// Lookup is case-insensitive
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Fails with `EmailAlreadyExists` when the email is taken
    async fn create(&self, user: &User) -> Result<User, DomainError>;
    async fn update(&self, user: &User) -> Result<User, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}

//! Application repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Application, ApplicationStatus};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Application>, DomainError>;
    async fn list_by_user(&self, user_id: &Uuid) -> Result<Vec<Application>, DomainError>;
    /// Newest first
    async fn list(&self, status: Option<ApplicationStatus>) -> Result<Vec<Application>, DomainError>;
    async fn create(&self, application: &Application) -> Result<Application, DomainError>;
    async fn update(&self, application: &Application) -> Result<Application, DomainError>;
}

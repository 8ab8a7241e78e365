//! Deal repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Deal, DealStatus};
use crate::error::DomainError;

/// Listing filter; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealFilter {
    pub status: Option<DealStatus>,
    pub founder_user_id: Option<Uuid>,
    pub active_only: bool,
}

impl DealFilter {
    pub fn public() -> Self {
        Self {
            status: Some(DealStatus::Approved),
            founder_user_id: None,
            active_only: true,
        }
    }

    pub fn by_founder(founder_user_id: Uuid) -> Self {
        Self {
            founder_user_id: Some(founder_user_id),
            ..Self::default()
        }
    }

    pub fn with_status(status: Option<DealStatus>) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        self.status.map_or(true, |s| deal.status == s)
            && self.founder_user_id.map_or(true, |f| deal.founder_user_id == Some(f))
            && (!self.active_only || deal.is_active)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Deal>, DomainError>;
    /// Newest first
    async fn list(&self, filter: DealFilter) -> Result<Vec<Deal>, DomainError>;
    async fn create(&self, deal: &Deal) -> Result<Deal, DomainError>;
    async fn update(&self, deal: &Deal) -> Result<Deal, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}

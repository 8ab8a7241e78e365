// ============================================================================
// Launchpad Core - Deal Service
// File: crates/launchpad-core/src/services/deal_service.rs
// ============================================================================
//! Deal creation, editing and the draft → pending → approved/rejected workflow

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Deal, DealDetails, DealStatus, NewDeal, UserRole};
use crate::error::DomainError;
use crate::lifecycle::{
    authorize_deal_activation, authorize_deal_creation, authorize_deal_delete, authorize_deal_edit,
    authorize_deal_transition, can_view_deal, require_admin, Actor,
};
use crate::repositories::{DealFilter, DealRepository, UserRepository};
use crate::validation::FieldErrors;

pub struct DealService {
    deals: Arc<dyn DealRepository>,
    users: Arc<dyn UserRepository>,
}

impl DealService {
    pub fn new(deals: Arc<dyn DealRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { deals, users }
    }

    async fn load(&self, id: &Uuid) -> Result<Deal, DomainError> {
        self.deals
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Deal", id))
    }

    /// Admins may attach a deal to an existing founder account
    async fn check_founder_reference(&self, founder_user_id: &Uuid) -> Result<(), DomainError> {
        match self.users.find_by_id(founder_user_id).await? {
            Some(user) if user.role == UserRole::Founder => Ok(()),
            _ => {
                let mut errors = FieldErrors::new();
                errors.add("founder_user_id", "Must reference an existing founder account");
                Err(errors.into())
            }
        }
    }

    /// Founders get an inactive draft they own. Admins get an approved deal,
    /// live unless `is_active` says otherwise.
    pub async fn create(&self, actor: &Actor, input: NewDeal) -> Result<Deal, DomainError> {
        authorize_deal_creation(actor)?;
        let details = input.details.validated()?;

        let deal = if actor.is_admin() {
            if let Some(founder_id) = &input.founder_user_id {
                self.check_founder_reference(founder_id).await?;
            }
            Deal::new_approved(details, actor.user_id, input.founder_user_id, input.is_active)
        } else {
            if input.is_active.is_some() || input.founder_user_id.is_some() {
                warn!(
                    "Ignoring admin-only deal fields from founder {}",
                    actor.user_id
                );
            }
            Deal::new_draft(details, actor.user_id)
        };

        let created = self.deals.create(&deal).await?;
        info!(
            "Deal {} ({}) created by {} as {}",
            created.id,
            created.company_name,
            actor.user_id,
            created.status.as_str()
        );
        Ok(created)
    }

    pub async fn update(&self, actor: &Actor, id: &Uuid, details: DealDetails) -> Result<Deal, DomainError> {
        let mut deal = self.load(id).await?;
        authorize_deal_edit(actor, &deal)?;

        let details = details.validated()?;
        let previous = deal.status;
        deal.apply_details(details);
        let updated = self.deals.update(&deal).await?;

        if previous != updated.status {
            info!("Deal {} edited and returned to {}", updated.id, updated.status.as_str());
        } else {
            info!("Deal {} edited by {}", updated.id, actor.user_id);
        }
        Ok(updated)
    }

    pub async fn submit_for_review(&self, actor: &Actor, id: &Uuid) -> Result<Deal, DomainError> {
        let mut deal = self.load(id).await?;
        authorize_deal_transition(actor, &deal, DealStatus::Pending)?;

        deal.submit_for_review();
        let updated = self.deals.update(&deal).await?;
        info!("Deal {} submitted for review", updated.id);
        Ok(updated)
    }

    pub async fn approve(&self, actor: &Actor, id: &Uuid) -> Result<Deal, DomainError> {
        let mut deal = self.load(id).await?;
        authorize_deal_transition(actor, &deal, DealStatus::Approved)?;

        deal.approve(actor.user_id);
        let updated = self.deals.update(&deal).await?;
        info!("Deal {} approved and activated by {}", updated.id, actor.user_id);
        Ok(updated)
    }

    pub async fn reject(&self, actor: &Actor, id: &Uuid, reason: Option<String>) -> Result<Deal, DomainError> {
        let mut deal = self.load(id).await?;
        authorize_deal_transition(actor, &deal, DealStatus::Rejected)?;

        deal.reject(actor.user_id, reason);
        let updated = self.deals.update(&deal).await?;
        info!("Deal {} rejected by {}", updated.id, actor.user_id);
        Ok(updated)
    }

    pub async fn set_active(&self, actor: &Actor, id: &Uuid, active: bool) -> Result<Deal, DomainError> {
        let mut deal = self.load(id).await?;
        authorize_deal_activation(actor, &deal, active)?;

        deal.set_active(active);
        let updated = self.deals.update(&deal).await?;
        info!(
            "Deal {} {} by {}",
            updated.id,
            if active { "activated" } else { "deactivated" },
            actor.user_id
        );
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Actor, id: &Uuid) -> Result<(), DomainError> {
        let deal = self.load(id).await?;
        authorize_deal_delete(actor, &deal)?;

        self.deals.delete(id).await?;
        info!("Deal {} deleted by {}", id, actor.user_id);
        Ok(())
    }

    /// Approved, active deals
    pub async fn list_public(&self) -> Result<Vec<Deal>, DomainError> {
        self.deals.list(DealFilter::public()).await
    }

    pub async fn list_mine(&self, actor: &Actor) -> Result<Vec<Deal>, DomainError> {
        if !actor.is_founder() {
            return Err(DomainError::PermissionDenied(
                "only founders have their own deals".to_string(),
            ));
        }
        self.deals.list(DealFilter::by_founder(actor.user_id)).await
    }

    pub async fn list_all(&self, actor: &Actor, status: Option<DealStatus>) -> Result<Vec<Deal>, DomainError> {
        require_admin(actor, "list all deals")?;
        self.deals.list(DealFilter::with_status(status)).await
    }

    /// Deals the caller may not see read as `NotFound`
    pub async fn get(&self, actor: Option<&Actor>, id: &Uuid) -> Result<Deal, DomainError> {
        self.deals
            .find_by_id(id)
            .await?
            .filter(|d| can_view_deal(actor, d))
            .ok_or_else(|| DomainError::not_found("Deal", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::deal::tests::sample_details;
    use crate::domain::User;
    use crate::repositories::deal_repository::MockDealRepository;
    use crate::repositories::user_repository::MockUserRepository;

    fn founder() -> Actor {
        Actor::new(Uuid::new_v4(), UserRole::Founder)
    }

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), UserRole::Admin)
    }

    fn new_deal() -> NewDeal {
        NewDeal {
            details: sample_details(),
            is_active: None,
            founder_user_id: None,
        }
    }

    fn echo_create() -> MockDealRepository {
        let mut deals = MockDealRepository::new();
        deals.expect_create().returning(|d| Ok(d.clone()));
        deals
    }

    #[tokio::test]
    async fn test_founder_deal_is_inactive_draft_even_if_asked_otherwise() {
        let service = DealService::new(Arc::new(echo_create()), Arc::new(MockUserRepository::new()));
        let actor = founder();
        let mut input = new_deal();
        input.is_active = Some(true);

        let deal = service.create(&actor, input).await.unwrap();
        assert_eq!(deal.status, DealStatus::Draft);
        assert!(!deal.is_active);
        assert_eq!(deal.founder_user_id, Some(actor.user_id));
    }

    #[tokio::test]
    async fn test_admin_deal_is_approved_and_active() {
        let service = DealService::new(Arc::new(echo_create()), Arc::new(MockUserRepository::new()));
        let deal = service.create(&admin(), new_deal()).await.unwrap();
        assert_eq!(deal.status, DealStatus::Approved);
        assert!(deal.is_active);

        let mut hidden = new_deal();
        hidden.is_active = Some(false);
        let deal = service.create(&admin(), hidden).await.unwrap();
        assert_eq!(deal.status, DealStatus::Approved);
        assert!(!deal.is_active);
    }

    #[tokio::test]
    async fn test_admin_founder_reference_must_be_founder() {
        let applicant = User::new(
            "Mae Jemison".to_string(),
            "mae@example.com".to_string(),
            UserRole::Applicant,
            None,
            "hash".to_string(),
        )
        .unwrap();
        let applicant_id = applicant.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(applicant.clone())));
        let mut deals = MockDealRepository::new();
        deals.expect_create().never();

        let service = DealService::new(Arc::new(deals), Arc::new(users));
        let mut input = new_deal();
        input.founder_user_id = Some(applicant_id);

        match service.create(&admin(), input).await {
            Err(DomainError::Validation(fields)) => assert!(fields.contains("founder_user_id")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_applicant_cannot_create_deal() {
        let mut deals = MockDealRepository::new();
        deals.expect_create().never();
        let service = DealService::new(Arc::new(deals), Arc::new(MockUserRepository::new()));
        let applicant = Actor::new(Uuid::new_v4(), UserRole::Applicant);

        assert!(matches!(
            service.create(&applicant, new_deal()).await,
            Err(DomainError::PermissionDenied(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_details_do_not_reach_repository() {
        let mut deals = MockDealRepository::new();
        deals.expect_create().never();
        let service = DealService::new(Arc::new(deals), Arc::new(MockUserRepository::new()));

        let mut input = new_deal();
        input.details.terms.target_amount = 0;
        assert!(matches!(
            service.create(&founder(), input).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_submitting_pending_deal_is_rejected_without_update() {
        let owner = founder();
        let mut existing = Deal::new_draft(sample_details(), owner.user_id);
        existing.submit_for_review();
        let id = existing.id;

        let mut deals = MockDealRepository::new();
        deals
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        deals.expect_update().never();

        let service = DealService::new(Arc::new(deals), Arc::new(MockUserRepository::new()));
        assert!(matches!(
            service.submit_for_review(&owner, &id).await,
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_mine_is_founder_only() {
        let mut deals = MockDealRepository::new();
        deals
            .expect_list()
            .withf(|filter| filter.founder_user_id.is_some())
            .returning(|_| Ok(vec![]));
        let service = DealService::new(Arc::new(deals), Arc::new(MockUserRepository::new()));

        assert!(service.list_mine(&founder()).await.unwrap().is_empty());
        assert!(service.list_mine(&admin()).await.is_err());
    }
}

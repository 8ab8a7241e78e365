// ============================================================================
// Launchpad Infrastructure - In-Memory Deal Repository
// File: crates/launchpad-infrastructure/src/memory/deal_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use launchpad_core::domain::Deal;
use launchpad_core::error::DomainError;
use launchpad_core::repositories::{DealFilter, DealRepository};

#[derive(Default)]
pub struct MemoryDealRepository {
    deals: DashMap<Uuid, Deal>,
}

impl MemoryDealRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DealRepository for MemoryDealRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Deal>, DomainError> {
        Ok(self.deals.get(id).map(|d| d.clone()))
    }

    async fn list(&self, filter: DealFilter) -> Result<Vec<Deal>, DomainError> {
        let mut deals: Vec<Deal> = self
            .deals
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        deals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(deals)
    }

    async fn create(&self, deal: &Deal) -> Result<Deal, DomainError> {
        if self.deals.contains_key(&deal.id) {
            return Err(DomainError::InternalError(format!("deal {} already stored", deal.id)));
        }
        self.deals.insert(deal.id, deal.clone());
        Ok(deal.clone())
    }

    async fn update(&self, deal: &Deal) -> Result<Deal, DomainError> {
        let mut stored = self
            .deals
            .get_mut(&deal.id)
            .ok_or_else(|| DomainError::not_found("Deal", deal.id))?;
        *stored = deal.clone();
        Ok(deal.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.deals.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::domain::{DealDetails, DealStatus, DealTerms, FundingStage};

    fn details() -> DealDetails {
        DealDetails {
            company_name: "Quarry Labs".to_string(),
            tagline: None,
            description: "Low-carbon cement from mining tailings.".to_string(),
            industry: "Materials".to_string(),
            stage: FundingStage::SeriesA,
            terms: DealTerms {
                target_amount: 2_000_000,
                minimum_investment: 5_000,
                valuation: 20_000_000,
                equity_offered: 10.0,
                closing_date: None,
            },
        }
    }

    #[tokio::test]
    async fn test_filters() {
        let repo = MemoryDealRepository::new();
        let founder = Uuid::new_v4();
        let admin = Uuid::new_v4();

        let draft = repo.create(&Deal::new_draft(details(), founder)).await.unwrap();
        let live = repo
            .create(&Deal::new_approved(details(), admin, None, None))
            .await
            .unwrap();
        repo.create(&Deal::new_approved(details(), admin, Some(founder), Some(false)))
            .await
            .unwrap();

        let public = repo.list(DealFilter::public()).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, live.id);

        assert_eq!(repo.list(DealFilter::by_founder(founder)).await.unwrap().len(), 2);
        let drafts = repo
            .list(DealFilter::with_status(Some(DealStatus::Draft)))
            .await
            .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, draft.id);
        assert_eq!(repo.list(DealFilter::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = MemoryDealRepository::new();
        let mut deal = repo
            .create(&Deal::new_draft(details(), Uuid::new_v4()))
            .await
            .unwrap();

        deal.submit_for_review();
        repo.update(&deal).await.unwrap();
        let stored = repo.find_by_id(&deal.id).await.unwrap().unwrap();
        assert_eq!(stored.status, DealStatus::Pending);

        assert!(repo.delete(&deal.id).await.unwrap());
        assert!(!repo.delete(&deal.id).await.unwrap());
        assert!(matches!(
            repo.update(&deal).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}

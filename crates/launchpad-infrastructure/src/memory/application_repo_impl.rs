// ============================================================================
// Launchpad Infrastructure - In-Memory Application Repository
// File: crates/launchpad-infrastructure/src/memory/application_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use launchpad_core::domain::{Application, ApplicationStatus};
use launchpad_core::error::DomainError;
use launchpad_core::repositories::ApplicationRepository;

#[derive(Default)]
pub struct MemoryApplicationRepository {
    applications: DashMap<Uuid, Application>,
}

impl MemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<F>(&self, keep: F) -> Vec<Application>
    where
        F: Fn(&Application) -> bool,
    {
        let mut found: Vec<Application> = self
            .applications
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        found.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        found
    }
}

#[async_trait]
impl ApplicationRepository for MemoryApplicationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Application>, DomainError> {
        Ok(self.applications.get(id).map(|a| a.clone()))
    }

    async fn list_by_user(&self, user_id: &Uuid) -> Result<Vec<Application>, DomainError> {
        Ok(self.collect(|a| a.user_id == *user_id))
    }

    async fn list(&self, status: Option<ApplicationStatus>) -> Result<Vec<Application>, DomainError> {
        Ok(self.collect(|a| status.map_or(true, |s| a.status == s)))
    }

    async fn create(&self, application: &Application) -> Result<Application, DomainError> {
        if self.applications.contains_key(&application.id) {
            return Err(DomainError::InternalError(format!(
                "application {} already stored",
                application.id
            )));
        }
        self.applications.insert(application.id, application.clone());
        Ok(application.clone())
    }

    async fn update(&self, application: &Application) -> Result<Application, DomainError> {
        let mut stored = self
            .applications
            .get_mut(&application.id)
            .ok_or_else(|| DomainError::not_found("Application", application.id))?;
        *stored = application.clone();
        Ok(application.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use launchpad_shared::FormData;

    fn form() -> FormData {
        [
            ("company_name", "Tidepool Robotics"),
            ("founder_name", "Sylvia Earle"),
            ("email", "sylvia@tidepool.io"),
            ("funding_amount", "250000"),
            ("stage", "seed"),
            (
                "description",
                "Autonomous robots that map and restore coastal reefs at scale.",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[tokio::test]
    async fn test_lists_are_newest_first_and_filtered() {
        let repo = MemoryApplicationRepository::new();
        let owner = Uuid::new_v4();

        let mut older = Application::submit(owner, &form()).unwrap();
        older.submitted_at = Utc::now() - Duration::hours(1);
        repo.create(&older).await.unwrap();
        let newer = repo.create(&Application::submit(owner, &form()).unwrap()).await.unwrap();
        repo.create(&Application::submit(Uuid::new_v4(), &form()).unwrap())
            .await
            .unwrap();

        let mine = repo.list_by_user(&owner).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, newer.id);
        assert_eq!(mine[1].id, older.id);

        let mut reviewed = older.clone();
        reviewed.set_status(ApplicationStatus::Reviewing, Uuid::new_v4());
        repo.update(&reviewed).await.unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 3);
        let reviewing = repo.list(Some(ApplicationStatus::Reviewing)).await.unwrap();
        assert_eq!(reviewing.len(), 1);
        assert_eq!(reviewing[0].id, older.id);
    }
}

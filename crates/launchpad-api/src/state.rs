use std::sync::Arc;

use tracing::info;

use launchpad_core::services::{ApplicationService, AuthService, DealService};
use launchpad_core::DomainError;
use launchpad_infrastructure::{
    MemoryApplicationRepository, MemoryDealRepository, MemoryPendingApplicationRepository,
    MemorySessionRepository, MemoryUserRepository,
};
use launchpad_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub applications: Arc<ApplicationService>,
    pub deals: Arc<DealService>,
}

impl AppState {
    /// Wire the services over fresh in-memory stores
    pub fn from_config(config: AppConfig) -> Self {
        let users = Arc::new(MemoryUserRepository::new());
        let sessions = Arc::new(MemorySessionRepository::new());

        let auth = AuthService::new(users.clone(), sessions, &config.auth);
        let applications = ApplicationService::new(
            Arc::new(MemoryApplicationRepository::new()),
            Arc::new(MemoryPendingApplicationRepository::new()),
            config.applications.pending_ttl,
        );
        let deals = DealService::new(Arc::new(MemoryDealRepository::new()), users);

        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            applications: Arc::new(applications),
            deals: Arc::new(deals),
        }
    }

    /// Create the admin accounts listed under `seed.admins`
    pub async fn seed_admins(&self) -> Result<usize, DomainError> {
        for admin in &self.config.seed.admins {
            self.auth
                .seed_admin(&admin.name, &admin.email, &admin.password)
                .await?;
        }
        let count = self.config.seed.admins.len();
        if count > 0 {
            info!("{} admin account(s) ready", count);
        }
        Ok(count)
    }
}

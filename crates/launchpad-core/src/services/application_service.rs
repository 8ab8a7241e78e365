// ============================================================================
// Launchpad Core - Application Service
// File: crates/launchpad-core/src/services/application_service.rs
// ============================================================================
//! Funding application submission, review and the pending-registration handoff

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use launchpad_security::token::{digest_token, generate_token};
use launchpad_shared::FormData;

use crate::domain::{validate_application_form, Application, ApplicationStatus, PendingApplication};
use crate::error::DomainError;
use crate::lifecycle::{
    authorize_application_status, authorize_application_submission, can_view_application, require_admin, Actor,
};
use crate::repositories::{ApplicationRepository, PendingApplicationRepository};

/// Handoff token returned when an anonymous visitor parks a form
#[derive(Debug, Clone)]
pub struct ParkedApplication {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    pending: Arc<dyn PendingApplicationRepository>,
    pending_ttl: i64,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        pending: Arc<dyn PendingApplicationRepository>,
        pending_ttl: i64,
    ) -> Self {
        Self {
            applications,
            pending,
            pending_ttl,
        }
    }

    /// Validate and store a new `pending` application for the applicant
    pub async fn submit(&self, actor: &Actor, form_data: &FormData) -> Result<Application, DomainError> {
        authorize_application_submission(actor)?;

        let application = Application::submit(actor.user_id, form_data)?;
        let created = self.applications.create(&application).await?;

        info!(
            "Application {} submitted by user {} ({})",
            created.id,
            actor.user_id,
            created.company_name().unwrap_or("unnamed company")
        );
        Ok(created)
    }

    /// Park a validated form until the visitor logs in or registers
    pub async fn park_pending(&self, form_data: &FormData) -> Result<ParkedApplication, DomainError> {
        let form_data = validate_application_form(form_data)?;

        let token = generate_token();
        let pending = PendingApplication::new(digest_token(&token), form_data, self.pending_ttl);
        self.pending.save(&pending).await?;

        info!("Parked application form until {}", pending.expires_at);
        Ok(ParkedApplication {
            token,
            expires_at: pending.expires_at,
        })
    }

    /// Submit a parked form under the now-authenticated applicant. Each token
    /// can be claimed once.
    pub async fn claim_pending(&self, actor: &Actor, token: &str) -> Result<Application, DomainError> {
        authorize_application_submission(actor)?;

        let pending = self
            .pending
            .take(&digest_token(token))
            .await?
            .filter(|p| !p.is_expired_at(Utc::now()))
            .ok_or_else(|| {
                warn!("Handoff token unknown or expired for user {}", actor.user_id);
                DomainError::not_found("Pending application", "handoff token")
            })?;

        let application = Application::submit(actor.user_id, &pending.form_data)?;
        let created = self.applications.create(&application).await?;

        info!(
            "Parked application claimed by user {} as {}",
            actor.user_id, created.id
        );
        Ok(created)
    }

    pub async fn list_mine(&self, actor: &Actor) -> Result<Vec<Application>, DomainError> {
        self.applications.list_by_user(&actor.user_id).await
    }

    /// Only the owner and admins can read an application; everyone else gets
    /// `NotFound`.
    pub async fn get(&self, actor: &Actor, id: &Uuid) -> Result<Application, DomainError> {
        self.applications
            .find_by_id(id)
            .await?
            .filter(|a| can_view_application(actor, a))
            .ok_or_else(|| DomainError::not_found("Application", id))
    }

    pub async fn list_all(
        &self,
        actor: &Actor,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, DomainError> {
        require_admin(actor, "list all applications")?;
        self.applications.list(status).await
    }

    pub async fn update_status(
        &self,
        actor: &Actor,
        id: &Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, DomainError> {
        let mut application = self
            .applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Application", id))?;

        authorize_application_status(actor, &application, status)?;

        let previous = application.status;
        application.set_status(status, actor.user_id);
        let updated = self.applications.update(&application).await?;

        info!(
            "Application {} moved from {} to {} by {}",
            updated.id,
            previous.as_str(),
            status.as_str(),
            actor.user_id
        );
        Ok(updated)
    }

    pub async fn purge_expired_pending(&self) -> Result<usize, DomainError> {
        self.pending.purge_expired(Utc::now()).await
    }
}

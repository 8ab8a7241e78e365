// ============================================================================
// Launchpad Core - Lifecycle Guards
// File: crates/launchpad-core/src/lifecycle.rs
// ============================================================================
//! Role-based permission checks for application and deal status changes.
//!
//! Every guard is pure: it inspects the actor and the current entity and
//! either allows the change or explains why not. Callers mutate only after a
//! guard returns `Ok`.

use tracing::warn;
use uuid::Uuid;

use crate::domain::{Application, ApplicationStatus, Deal, DealStatus, User, UserRole};
use crate::error::DomainError;

/// The authenticated user performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_founder(&self) -> bool {
        self.role == UserRole::Founder
    }

    pub fn is_applicant(&self) -> bool {
        self.role == UserRole::Applicant
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

fn denied(actor: &Actor, reason: &str) -> DomainError {
    warn!(
        "Permission denied for user {} ({}): {}",
        actor.user_id,
        actor.role.as_str(),
        reason
    );
    DomainError::PermissionDenied(reason.to_string())
}

pub fn require_admin(actor: &Actor, action: &str) -> Result<(), DomainError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(denied(actor, &format!("only administrators can {}", action)))
    }
}

/// Only admins change application status. Any target status is allowed,
/// including moving a decided application back under review.
pub fn authorize_application_status(
    actor: &Actor,
    application: &Application,
    target: ApplicationStatus,
) -> Result<(), DomainError> {
    require_admin(actor, "change application status").map_err(|e| {
        warn!(
            "Rejected status change of application {} to {}",
            application.id,
            target.as_str()
        );
        e
    })
}

pub fn authorize_application_submission(actor: &Actor) -> Result<(), DomainError> {
    if actor.is_applicant() {
        Ok(())
    } else {
        Err(denied(actor, "only applicants can submit funding applications"))
    }
}

pub fn can_view_application(actor: &Actor, application: &Application) -> bool {
    actor.is_admin() || application.is_owned_by(actor.user_id)
}

pub fn authorize_deal_creation(actor: &Actor) -> Result<(), DomainError> {
    match actor.role {
        UserRole::Admin | UserRole::Founder => Ok(()),
        UserRole::Applicant => Err(denied(actor, "only founders and administrators can create deals")),
    }
}

/// Status transition guard for deals.
///
/// Admins may approve or reject any deal. The owning founder may move a
/// `draft` deal to `pending` and nothing else.
pub fn authorize_deal_transition(
    actor: &Actor,
    deal: &Deal,
    target: DealStatus,
) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidTransition {
        entity: "deal",
        from: deal.status.as_str().to_string(),
        to: target.as_str().to_string(),
    };

    match actor.role {
        UserRole::Admin => match target {
            DealStatus::Approved | DealStatus::Rejected => Ok(()),
            DealStatus::Draft | DealStatus::Pending => Err(invalid()),
        },
        UserRole::Founder if deal.is_owned_by(actor.user_id) => {
            if target != DealStatus::Pending {
                return Err(denied(actor, "founders can only submit their deals for review"));
            }
            if deal.status != DealStatus::Draft {
                warn!(
                    "Deal {} cannot be submitted from status {}",
                    deal.id,
                    deal.status.as_str()
                );
                return Err(invalid());
            }
            Ok(())
        }
        _ => Err(denied(actor, "you do not have permission to modify this deal")),
    }
}

/// Admins may always edit. The owning founder may edit while the deal is a
/// draft or has been rejected.
pub fn authorize_deal_edit(actor: &Actor, deal: &Deal) -> Result<(), DomainError> {
    if actor.is_admin() {
        return Ok(());
    }
    if !(actor.is_founder() && deal.is_owned_by(actor.user_id)) {
        return Err(denied(actor, "you do not have permission to modify this deal"));
    }
    match deal.status {
        DealStatus::Draft | DealStatus::Rejected => Ok(()),
        DealStatus::Pending | DealStatus::Approved => Err(DomainError::InvalidState(format!(
            "a {} deal cannot be edited by its founder",
            deal.status.as_str()
        ))),
    }
}

pub fn authorize_deal_delete(actor: &Actor, deal: &Deal) -> Result<(), DomainError> {
    if actor.is_admin() {
        return Ok(());
    }
    if !(actor.is_founder() && deal.is_owned_by(actor.user_id)) {
        return Err(denied(actor, "you do not have permission to delete this deal"));
    }
    if deal.status != DealStatus::Draft {
        return Err(DomainError::InvalidState(format!(
            "only draft deals can be deleted by their founder, this one is {}",
            deal.status.as_str()
        )));
    }
    Ok(())
}

/// Only admins toggle `is_active`, and only approved deals can go live.
pub fn authorize_deal_activation(actor: &Actor, deal: &Deal, active: bool) -> Result<(), DomainError> {
    require_admin(actor, "activate or deactivate deals")?;
    if active && deal.status != DealStatus::Approved {
        return Err(DomainError::InvalidState(format!(
            "only approved deals can be activated, this one is {}",
            deal.status.as_str()
        )));
    }
    Ok(())
}

/// Public deals are visible to everyone, anything else only to its founder
/// and to admins.
pub fn can_view_deal(actor: Option<&Actor>, deal: &Deal) -> bool {
    if deal.is_public() {
        return true;
    }
    match actor {
        Some(a) => a.is_admin() || deal.is_owned_by(a.user_id),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::application::tests::valid_form;
    use crate::domain::deal::tests::sample_details;

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), UserRole::Admin)
    }

    fn founder() -> Actor {
        Actor::new(Uuid::new_v4(), UserRole::Founder)
    }

    fn applicant() -> Actor {
        Actor::new(Uuid::new_v4(), UserRole::Applicant)
    }

    fn draft_of(owner: &Actor) -> Deal {
        Deal::new_draft(sample_details(), owner.user_id)
    }

    #[test]
    fn test_only_admin_changes_application_status() {
        let owner = applicant();
        let app = Application::submit(owner.user_id, &valid_form()).unwrap();

        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Reviewing,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert!(authorize_application_status(&admin(), &app, status).is_ok());
            assert!(matches!(
                authorize_application_status(&owner, &app, status),
                Err(DomainError::PermissionDenied(_))
            ));
            assert!(authorize_application_status(&founder(), &app, status).is_err());
        }
    }

    #[test]
    fn test_owner_founder_submits_draft() {
        let owner = founder();
        let deal = draft_of(&owner);
        assert!(authorize_deal_transition(&owner, &deal, DealStatus::Pending).is_ok());
    }

    #[test]
    fn test_submitting_non_draft_is_rejected() {
        let owner = founder();
        let mut deal = draft_of(&owner);
        deal.submit_for_review();
        assert!(matches!(
            authorize_deal_transition(&owner, &deal, DealStatus::Pending),
            Err(DomainError::InvalidTransition { .. })
        ));

        deal.approve(Uuid::new_v4());
        assert!(authorize_deal_transition(&owner, &deal, DealStatus::Pending).is_err());

        deal.reject(Uuid::new_v4(), None);
        assert!(authorize_deal_transition(&owner, &deal, DealStatus::Pending).is_err());
    }

    #[test]
    fn test_founder_cannot_approve_own_deal() {
        let owner = founder();
        let deal = draft_of(&owner);
        for target in [DealStatus::Approved, DealStatus::Rejected, DealStatus::Draft] {
            assert!(matches!(
                authorize_deal_transition(&owner, &deal, target),
                Err(DomainError::PermissionDenied(_))
            ));
        }
    }

    #[test]
    fn test_strangers_cannot_touch_deal() {
        let deal = draft_of(&founder());
        for stranger in [founder(), applicant()] {
            assert!(matches!(
                authorize_deal_transition(&stranger, &deal, DealStatus::Pending),
                Err(DomainError::PermissionDenied(_))
            ));
            assert!(authorize_deal_edit(&stranger, &deal).is_err());
            assert!(authorize_deal_delete(&stranger, &deal).is_err());
        }
    }

    #[test]
    fn test_admin_approves_or_rejects_any_deal() {
        let mut deal = draft_of(&founder());
        let reviewer = admin();
        assert!(authorize_deal_transition(&reviewer, &deal, DealStatus::Approved).is_ok());
        assert!(authorize_deal_transition(&reviewer, &deal, DealStatus::Rejected).is_ok());
        deal.submit_for_review();
        assert!(authorize_deal_transition(&reviewer, &deal, DealStatus::Approved).is_ok());
        assert!(matches!(
            authorize_deal_transition(&reviewer, &deal, DealStatus::Draft),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_founder_edit_window() {
        let owner = founder();
        let mut deal = draft_of(&owner);
        assert!(authorize_deal_edit(&owner, &deal).is_ok());

        deal.submit_for_review();
        assert!(matches!(authorize_deal_edit(&owner, &deal), Err(DomainError::InvalidState(_))));
        assert!(authorize_deal_edit(&admin(), &deal).is_ok());

        deal.reject(Uuid::new_v4(), None);
        assert!(authorize_deal_edit(&owner, &deal).is_ok());
    }

    #[test]
    fn test_delete_rules() {
        let owner = founder();
        let mut deal = draft_of(&owner);
        assert!(authorize_deal_delete(&owner, &deal).is_ok());
        deal.submit_for_review();
        assert!(authorize_deal_delete(&owner, &deal).is_err());
        assert!(authorize_deal_delete(&admin(), &deal).is_ok());
    }

    #[test]
    fn test_activation_is_admin_only_and_requires_approval() {
        let owner = founder();
        let mut deal = draft_of(&owner);
        assert!(matches!(
            authorize_deal_activation(&admin(), &deal, true),
            Err(DomainError::InvalidState(_))
        ));
        assert!(authorize_deal_activation(&admin(), &deal, false).is_ok());

        deal.approve(Uuid::new_v4());
        assert!(authorize_deal_activation(&admin(), &deal, true).is_ok());
        assert!(matches!(
            authorize_deal_activation(&owner, &deal, false),
            Err(DomainError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_deal_visibility() {
        let owner = founder();
        let mut deal = draft_of(&owner);
        assert!(!can_view_deal(None, &deal));
        assert!(!can_view_deal(Some(&applicant()), &deal));
        assert!(can_view_deal(Some(&owner), &deal));
        assert!(can_view_deal(Some(&admin()), &deal));

        deal.approve(Uuid::new_v4());
        assert!(can_view_deal(None, &deal));

        deal.set_active(false);
        assert!(!can_view_deal(None, &deal));
    }

    #[test]
    fn test_creation_and_submission_roles() {
        assert!(authorize_deal_creation(&admin()).is_ok());
        assert!(authorize_deal_creation(&founder()).is_ok());
        assert!(authorize_deal_creation(&applicant()).is_err());

        assert!(authorize_application_submission(&applicant()).is_ok());
        assert!(authorize_application_submission(&founder()).is_err());
        assert!(authorize_application_submission(&admin()).is_err());
    }

    #[test]
    fn test_application_visibility() {
        let owner = applicant();
        let app = Application::submit(owner.user_id, &valid_form()).unwrap();
        assert!(can_view_application(&owner, &app));
        assert!(can_view_application(&admin(), &app));
        assert!(!can_view_application(&applicant(), &app));
    }
}

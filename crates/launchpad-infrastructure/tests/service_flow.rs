//! Services wired over the in-memory adapters

use std::sync::Arc;

use launchpad_core::domain::{
    ApplicationStatus, DealDetails, DealStatus, DealTerms, FundingStage, NewDeal, UserRole,
};
use launchpad_core::services::{ApplicationService, AuthService, DealService, RegisterInput};
use launchpad_core::DomainError;
use launchpad_infrastructure::{
    MemoryApplicationRepository, MemoryDealRepository, MemoryPendingApplicationRepository,
    MemorySessionRepository, MemoryUserRepository,
};
use launchpad_shared::config::AuthSettings;
use launchpad_shared::FormData;

struct Platform {
    auth: AuthService,
    applications: ApplicationService,
    deals: DealService,
}

fn platform() -> Platform {
    let users = Arc::new(MemoryUserRepository::new());
    let settings = AuthSettings {
        jwt_secret: "flow-test-secret".to_string(),
        access_token_expiry: 3600,
        session_ttl: 3600,
        login_attempts_per_minute: 10,
    };
    Platform {
        auth: AuthService::new(users.clone(), Arc::new(MemorySessionRepository::new()), &settings),
        applications: ApplicationService::new(
            Arc::new(MemoryApplicationRepository::new()),
            Arc::new(MemoryPendingApplicationRepository::new()),
            3600,
        ),
        deals: DealService::new(Arc::new(MemoryDealRepository::new()), users),
    }
}

fn register_input(name: &str, email: &str, role: UserRole, company: Option<&str>) -> RegisterInput {
    RegisterInput {
        name: name.to_string(),
        email: email.to_string(),
        password: "correct horse battery staple".to_string(),
        role,
        company_name: company.map(str::to_string),
    }
}

fn form() -> FormData {
    [
        ("company_name", "Tidepool Robotics"),
        ("founder_name", "Sylvia Earle"),
        ("email", "sylvia@tidepool.io"),
        ("funding_amount", "250000"),
        ("stage", "pre-seed"),
        (
            "description",
            "Autonomous robots that map and restore coastal reefs at scale.",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn details() -> DealDetails {
    DealDetails {
        company_name: "Tidepool Robotics".to_string(),
        tagline: Some("Reef restoration robots".to_string()),
        description: "Autonomous robots that map and restore coastal reefs.".to_string(),
        industry: "Climate".to_string(),
        stage: FundingStage::Seed,
        terms: DealTerms {
            target_amount: 1_000_000,
            minimum_investment: 2_500,
            valuation: 8_000_000,
            equity_offered: 12.5,
            closing_date: None,
        },
    }
}

#[tokio::test]
async fn test_application_lifecycle_with_handoff() {
    let p = platform();
    let admin = p
        .auth
        .seed_admin("Root Admin", "admin@launchpad.test", "correct horse battery staple")
        .await
        .unwrap();
    let admin_actor = launchpad_core::Actor::from(&admin);

    // Anonymous visitor parks a form, then registers and claims it
    let parked = p.applications.park_pending(&form()).await.unwrap();
    let session = p
        .auth
        .register(register_input("Sylvia Earle", "sylvia@tidepool.io", UserRole::Applicant, None))
        .await
        .unwrap();
    let principal = p.auth.authenticate(&session.access_token).await.unwrap();
    let applicant = principal.actor();

    let claimed = p.applications.claim_pending(&applicant, &parked.token).await.unwrap();
    assert_eq!(claimed.status, ApplicationStatus::Pending);
    assert!(matches!(
        p.applications.claim_pending(&applicant, &parked.token).await,
        Err(DomainError::NotFound { .. })
    ));

    assert_eq!(p.applications.list_mine(&applicant).await.unwrap().len(), 1);
    assert!(p.applications.list_all(&applicant, None).await.is_err());

    let reviewing = p
        .applications
        .update_status(&admin_actor, &claimed.id, ApplicationStatus::Reviewing)
        .await
        .unwrap();
    assert_eq!(reviewing.status, ApplicationStatus::Reviewing);

    let approved = p
        .applications
        .update_status(&admin_actor, &claimed.id, ApplicationStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.reviewed_by, Some(admin.id));

    let pending_only = p
        .applications
        .list_all(&admin_actor, Some(ApplicationStatus::Pending))
        .await
        .unwrap();
    assert!(pending_only.is_empty());
}

#[tokio::test]
async fn test_deal_lifecycle() {
    let p = platform();
    let admin = p
        .auth
        .seed_admin("Root Admin", "admin@launchpad.test", "correct horse battery staple")
        .await
        .unwrap();
    let admin_actor = launchpad_core::Actor::from(&admin);

    let founder = p
        .auth
        .register(register_input(
            "Sylvia Earle",
            "founder@tidepool.io",
            UserRole::Founder,
            Some("Tidepool Robotics"),
        ))
        .await
        .unwrap()
        .user;
    let founder_actor = launchpad_core::Actor::from(&founder);

    let draft = p
        .deals
        .create(
            &founder_actor,
            NewDeal {
                details: details(),
                is_active: None,
                founder_user_id: None,
            },
        )
        .await
        .unwrap();
    assert!(p.deals.list_public().await.unwrap().is_empty());
    assert!(p.deals.get(None, &draft.id).await.is_err());

    let pending = p.deals.submit_for_review(&founder_actor, &draft.id).await.unwrap();
    assert_eq!(pending.status, DealStatus::Pending);

    let rejected = p
        .deals
        .reject(&admin_actor, &draft.id, Some("Needs traction data".to_string()))
        .await
        .unwrap();
    assert_eq!(rejected.status, DealStatus::Rejected);

    // Editing a rejected deal returns it to draft for resubmission
    let edited = p.deals.update(&founder_actor, &draft.id, details()).await.unwrap();
    assert_eq!(edited.status, DealStatus::Draft);
    p.deals.submit_for_review(&founder_actor, &draft.id).await.unwrap();

    let approved = p.deals.approve(&admin_actor, &draft.id).await.unwrap();
    assert!(approved.is_public());
    assert_eq!(p.deals.list_public().await.unwrap().len(), 1);
    assert!(p.deals.get(None, &draft.id).await.is_ok());

    p.deals.set_active(&admin_actor, &draft.id, false).await.unwrap();
    assert!(p.deals.list_public().await.unwrap().is_empty());
    assert_eq!(p.deals.list_mine(&founder_actor).await.unwrap().len(), 1);

    assert!(matches!(
        p.deals.delete(&founder_actor, &draft.id).await,
        Err(DomainError::InvalidState(_))
    ));
    p.deals.delete(&admin_actor, &draft.id).await.unwrap();
    assert!(p.deals.list_all(&admin_actor, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let p = platform();
    let session = p
        .auth
        .register(register_input("Sylvia Earle", "sylvia@tidepool.io", UserRole::Applicant, None))
        .await
        .unwrap();
    assert!(p.auth.authenticate(&session.access_token).await.is_ok());

    p.auth.logout(&session.session_id).await.unwrap();
    assert!(matches!(
        p.auth.authenticate(&session.access_token).await,
        Err(DomainError::Unauthenticated(_))
    ));

    let again = p
        .auth
        .login("SYLVIA@tidepool.io", "correct horse battery staple")
        .await
        .unwrap();
    assert_eq!(again.user.id, session.user.id);
}

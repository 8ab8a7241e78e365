// ============================================================================
// Launchpad Core - Authentication Service
// File: crates/launchpad-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service with login, register, logout and token checks

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::{error, info, warn};
use uuid::Uuid;

use launchpad_security::jwt::JwtError;
use launchpad_security::password::{PasswordService, PasswordStrength};
use launchpad_security::{JwtService, Session};
use launchpad_shared::config::AuthSettings;
use launchpad_shared::utils::{mask_email, normalize_email};

use crate::domain::{User, UserRole};
use crate::error::DomainError;
use crate::lifecycle::{require_admin, Actor};
use crate::repositories::{SessionRepository, UserRepository};

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub company_name: Option<String>,
}

/// Result of a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub session_id: Uuid,
    pub access_token: String,
    pub expires_in: i64,
}

/// The user behind a validated bearer token
#[derive(Debug, Clone)]
pub struct Principal {
    pub user: User,
    pub session_id: Uuid,
}

impl Principal {
    pub fn actor(&self) -> Actor {
        Actor::from(&self.user)
    }
}

/// Authentication service for handling user login/register flows
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    jwt: JwtService,
    session_ttl: i64,
    login_limiter: DefaultKeyedRateLimiter<String>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        settings: &AuthSettings,
    ) -> Self {
        let per_minute = NonZeroU32::new(settings.login_attempts_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            users,
            sessions,
            jwt: JwtService::new(settings.jwt_secret.clone(), settings.access_token_expiry),
            session_ttl: settings.session_ttl,
            login_limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
        }
    }

    fn check_password_policy(password: &str, name: &str, email: &str) -> Result<(), DomainError> {
        match PasswordService::check_strength(password, &[name, email]) {
            PasswordStrength::Acceptable => Ok(()),
            PasswordStrength::TooShort => Err(DomainError::PasswordTooShort),
            PasswordStrength::TooLong => Err(DomainError::PasswordTooLong),
            PasswordStrength::TooWeak => Err(DomainError::PasswordTooWeak),
        }
    }

    /// Argon2 work runs on the blocking pool
    async fn hash_password(password: String) -> Result<String, DomainError> {
        tokio::task::spawn_blocking(move || PasswordService::hash(&password))
            .await
            .map_err(|e| DomainError::InternalError(e.to_string()))?
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }

    async fn verify_password(password: String, hash: String) -> Result<bool, DomainError> {
        tokio::task::spawn_blocking(move || PasswordService::verify(&password, &hash))
            .await
            .map_err(|e| DomainError::InternalError(e.to_string()))?
            .map_err(|_e| DomainError::InvalidCredentials)
    }

    async fn create_user(&self, input: RegisterInput) -> Result<User, DomainError> {
        let email = normalize_email(&input.email);

        // 1. Validate fields before doing any expensive work
        let password_hash = String::new();
        let probe = User::new(
            input.name.clone(),
            email.clone(),
            input.role,
            input.company_name.clone(),
            password_hash,
        )?;

        // 2. Check if email already exists
        if self.users.find_by_email(&email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(&email));
            return Err(DomainError::EmailAlreadyExists(email));
        }

        // 3. Password policy, then hash
        Self::check_password_policy(&input.password, &probe.name, &email)?;
        let password_hash = Self::hash_password(input.password).await?;

        let user = User {
            password_hash,
            ..probe
        };

        // 4. Save; the repository re-checks uniqueness atomically
        self.users.create(&user).await
    }

    async fn open_session(&self, user: &User) -> Result<AuthResult, DomainError> {
        let session = self.sessions.create(&Session::new(user.id, self.session_ttl)).await?;
        let access_token = self
            .jwt
            .generate_access_token(&user.id, &session.id, user.role.as_str())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        Ok(AuthResult {
            user: user.clone(),
            session_id: session.id,
            access_token,
            expires_in: self.jwt.access_token_expiry(),
        })
    }

    /// Register a new applicant or founder and sign them in
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResult, DomainError> {
        info!("Registration attempt for email: {}", mask_email(&input.email));

        if input.role == UserRole::Admin {
            warn!("Registration refused: admin accounts cannot self-register");
            return Err(DomainError::PermissionDenied(
                "administrator accounts cannot be self-registered".to_string(),
            ));
        }

        let user = self.create_user(input).await?;
        let result = self.open_session(&user).await?;

        info!("Registration successful for user {} ({})", user.id, user.role.as_str());
        Ok(result)
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, DomainError> {
        let email = normalize_email(email);
        info!("Login attempt for email: {}", mask_email(&email));

        // 1. Throttle per email
        if self.login_limiter.check_key(&email).is_err() {
            warn!("Login throttled for: {}", mask_email(&email));
            return Err(DomainError::TooManyAttempts);
        }

        // 2. Find user by email
        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", mask_email(&email));
            DomainError::InvalidCredentials
        })?;

        // 3. Verify password
        let password_valid =
            Self::verify_password(password.to_string(), user.password_hash.clone()).await?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", mask_email(&email));
            return Err(DomainError::InvalidCredentials);
        }

        // 4. Check if user can login
        if !user.can_login() {
            warn!("Login failed: user {} is not active", user.id);
            return Err(DomainError::UserNotActive);
        }

        // 5. Update last login
        let mut updated_user = user.clone();
        updated_user.record_login();
        let user = match self.users.update(&updated_user).await {
            Ok(u) => u,
            Err(e) => {
                error!("Failed to update last login: {}", e);
                // Don't fail login for this
                user
            }
        };

        let result = self.open_session(&user).await?;
        info!("Login successful for user {}", user.id);
        Ok(result)
    }

    /// Revoke the session behind a token
    pub async fn logout(&self, session_id: &Uuid) -> Result<(), DomainError> {
        if self.sessions.delete(session_id).await? {
            info!("Session {} revoked", session_id);
        } else {
            warn!("Logout for unknown session {}", session_id);
        }
        Ok(())
    }

    /// Resolve a bearer token into its user. The session must still exist.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, DomainError> {
        let claims = self.jwt.validate_token(token).map_err(|e| match e {
            JwtError::TokenExpired => DomainError::Unauthenticated("token expired".to_string()),
            other => DomainError::Unauthenticated(other.to_string()),
        })?;
        let session_id = claims
            .session_id()
            .map_err(|e| DomainError::Unauthenticated(e.to_string()))?;
        let user_id = claims
            .user_id()
            .map_err(|e| DomainError::Unauthenticated(e.to_string()))?;

        let session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or_else(|| DomainError::Unauthenticated("session revoked".to_string()))?;
        if session.user_id != user_id {
            return Err(DomainError::Unauthenticated("session does not match token".to_string()));
        }
        if session.is_expired() {
            self.sessions.delete(&session.id).await?;
            return Err(DomainError::Unauthenticated("session expired".to_string()));
        }

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthenticated("user no longer exists".to_string()))?;
        if !user.can_login() {
            return Err(DomainError::UserNotActive);
        }

        Ok(Principal { user, session_id })
    }

    /// Create an admin account from configuration. Safe to call on every start.
    pub async fn seed_admin(&self, name: &str, email: &str, password: &str) -> Result<User, DomainError> {
        let email = normalize_email(email);
        if let Some(existing) = self.users.find_by_email(&email).await? {
            if existing.role == UserRole::Admin {
                info!("Admin {} already present", mask_email(&email));
                return Ok(existing);
            }
            warn!("Cannot seed admin {}: email belongs to a {}", mask_email(&email), existing.role.as_str());
            return Err(DomainError::EmailAlreadyExists(email));
        }

        let user = self
            .create_user(RegisterInput {
                name: name.to_string(),
                email: email.clone(),
                password: password.to_string(),
                role: UserRole::Admin,
                company_name: None,
            })
            .await?;
        info!("Seeded admin account {}", mask_email(&email));
        Ok(user)
    }

    pub async fn list_users(&self, actor: &Actor) -> Result<Vec<User>, DomainError> {
        require_admin(actor, "list users")?;
        self.users.list().await
    }

    pub async fn purge_expired_sessions(&self) -> Result<usize, DomainError> {
        self.sessions.purge_expired(chrono::Utc::now()).await
    }

    /// Forget throttling state for emails whose quota has fully replenished.
    /// Returns how many keys were dropped.
    pub fn purge_login_limiter(&self) -> usize {
        let before = self.login_limiter.len();
        self.login_limiter.retain_recent();
        self.login_limiter.shrink_to_fit();
        before.saturating_sub(self.login_limiter.len())
    }
}

// ============================================================================
// Launchpad API - Auth Handlers
// File: crates/launchpad-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (register, login, logout, me)

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use launchpad_core::domain::{Application, User, UserRole};
use launchpad_core::services::{AuthResult, RegisterInput};

use crate::error::ApiError;
use crate::extract::{ApiJson, CurrentUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Parked application to submit once signed in
    pub pending_application_token: Option<String>,
}

/// Register request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    pub company_name: Option<String>,
    pub pending_application_token: Option<String>,
}

/// User DTO for responses
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            company_name: user.company_name.clone(),
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Authentication response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserDto,
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    /// Set when a parked application was submitted on the user's behalf
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
}

/// Claim a parked application for a freshly signed-in user. A failed claim
/// never fails the sign-in itself.
async fn claim_handoff(state: &AppState, result: &AuthResult, token: Option<&str>) -> Option<Application> {
    let token = token.map(str::trim).filter(|t| !t.is_empty())?;
    let actor = launchpad_core::Actor::from(&result.user);
    if !actor.is_applicant() {
        warn!(
            "Ignoring pending application token for {} user {}",
            actor.role.as_str(),
            actor.user_id
        );
        return None;
    }

    match state.applications.claim_pending(&actor, token).await {
        Ok(application) => Some(application),
        Err(e) => {
            warn!("Could not claim parked application for user {}: {}", actor.user_id, e);
            None
        }
    }
}

fn auth_response(result: AuthResult, application: Option<Application>) -> AuthResponse {
    AuthResponse {
        user: UserDto::from(&result.user),
        access_token: result.access_token,
        token_type: "Bearer",
        expires_in: result.expires_in,
        application,
    }
}

/// Register handler - POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let result = state
        .auth
        .register(RegisterInput {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: payload.role,
            company_name: payload.company_name,
        })
        .await?;

    let application = claim_handoff(&state, &result, payload.pending_application_token.as_deref()).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(auth_response(result, application))),
    ))
}

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".to_string()));
    }

    let result = state.auth.login(&payload.email, &payload.password).await?;
    let application = claim_handoff(&state, &result, payload.pending_application_token.as_deref()).await;
    Ok(Json(ApiResponse::success(auth_response(result, application))))
}

/// Logout handler - POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.auth.logout(&principal.session_id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Logged out successfully")))
}

/// Current user - GET /api/v1/auth/me
pub async fn me(CurrentUser(principal): CurrentUser) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::success(UserDto::from(&principal.user)))
}

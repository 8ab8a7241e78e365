// ============================================================================
// Launchpad API - Admin Handlers
// File: crates/launchpad-api/src/handlers/admin.rs
// ============================================================================
//! Review queue and account listing for administrators

use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use launchpad_core::domain::{Application, ApplicationStatus, DealStatus};
use launchpad_core::FieldErrors;

use super::auth::UserDto;
use super::deals::{to_dtos, DealDto};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, CurrentUser};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Parse an optional `?status=` value, reporting unknown values on the field
fn parse_status<T>(raw: Option<&str>, parse: fn(&str) -> Option<T>) -> Result<Option<T>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse(s).map(Some).ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.add("status", format!("Unknown status '{}'", s));
            ApiError::from(errors)
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationStatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActiveRequest {
    pub is_active: bool,
}

/// All applications - GET /api/v1/admin/applications
pub async fn list_applications(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> Result<Json<ApiResponse<Vec<Application>>>, ApiError> {
    let status = parse_status(query.status.as_deref(), ApplicationStatus::from_str)?;
    let applications = state.applications.list_all(&user.actor(), status).await?;
    Ok(Json(ApiResponse::success(applications)))
}

/// Change status - PATCH /api/v1/admin/applications/{id}/status
pub async fn update_application_status(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ApplicationStatusRequest>,
) -> Result<Json<ApiResponse<Application>>, ApiError> {
    let application = state
        .applications
        .update_status(&user.actor(), &id, payload.status)
        .await?;
    Ok(Json(ApiResponse::success(application)))
}

/// All deals - GET /api/v1/admin/deals
pub async fn list_deals(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> Result<Json<ApiResponse<Vec<DealDto>>>, ApiError> {
    let status = parse_status(query.status.as_deref(), DealStatus::from_str)?;
    let deals = state.deals.list_all(&user.actor(), status).await?;
    Ok(Json(ApiResponse::success(to_dtos(deals))))
}

/// Approve - POST /api/v1/admin/deals/{id}/approve
pub async fn approve_deal(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<DealDto>>, ApiError> {
    let deal = state.deals.approve(&user.actor(), &id).await?;
    Ok(Json(ApiResponse::success_with_message(deal.into(), "Deal approved")))
}

/// Reject - POST /api/v1/admin/deals/{id}/reject
pub async fn reject_deal(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    payload: Option<ApiJson<RejectRequest>>,
) -> Result<Json<ApiResponse<DealDto>>, ApiError> {
    let reason = payload.and_then(|ApiJson(r)| r.reason);
    let deal = state.deals.reject(&user.actor(), &id, reason).await?;
    Ok(Json(ApiResponse::success_with_message(deal.into(), "Deal rejected")))
}

/// Toggle visibility - PATCH /api/v1/admin/deals/{id}/active
pub async fn set_deal_active(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ActiveRequest>,
) -> Result<Json<ApiResponse<DealDto>>, ApiError> {
    let deal = state
        .deals
        .set_active(&user.actor(), &id, payload.is_active)
        .await?;
    Ok(Json(ApiResponse::success(deal.into())))
}

/// Accounts - GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.auth.list_users(&user.actor()).await?;
    Ok(Json(ApiResponse::success(users.iter().map(UserDto::from).collect())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(None, DealStatus::from_str).unwrap(), None);
        assert_eq!(parse_status(Some(" "), DealStatus::from_str).unwrap(), None);
        assert_eq!(
            parse_status(Some("Pending"), DealStatus::from_str).unwrap(),
            Some(DealStatus::Pending)
        );
        assert!(parse_status(Some("archived"), ApplicationStatus::from_str).is_err());
    }
}

// ============================================================================
// Launchpad API - Deal Handlers
// File: crates/launchpad-api/src/handlers/deals.rs
// ============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use launchpad_core::domain::{Deal, DealDetails, NewDeal};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, CurrentUser, OptionalUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Deal with its funding progress
#[derive(Debug, Serialize)]
pub struct DealDto {
    #[serde(flatten)]
    pub deal: Deal,
    pub progress: f64,
}

impl From<Deal> for DealDto {
    fn from(deal: Deal) -> Self {
        let progress = deal.progress();
        Self { deal, progress }
    }
}

pub(crate) fn to_dtos(deals: Vec<Deal>) -> Vec<DealDto> {
    deals.into_iter().map(DealDto::from).collect()
}

#[derive(Debug, Deserialize)]
pub struct CreateDealRequest {
    #[serde(flatten)]
    pub details: DealDetails,
    /// Admin only
    pub is_active: Option<bool>,
    /// Admin only
    pub founder_user_id: Option<Uuid>,
}

/// Public deals - GET /api/v1/deals
pub async fn list_public(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<DealDto>>>, ApiError> {
    let deals = state.deals.list_public().await?;
    Ok(Json(ApiResponse::success(to_dtos(deals))))
}

/// Create - POST /api/v1/deals
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<CreateDealRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DealDto>>), ApiError> {
    let deal = state
        .deals
        .create(
            &user.actor(),
            NewDeal {
                details: payload.details,
                is_active: payload.is_active,
                founder_user_id: payload.founder_user_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(deal.into()))))
}

/// Founder's own deals - GET /api/v1/deals/mine
pub async fn list_mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<DealDto>>>, ApiError> {
    let deals = state.deals.list_mine(&user.actor()).await?;
    Ok(Json(ApiResponse::success(to_dtos(deals))))
}

/// One deal - GET /api/v1/deals/{id}
pub async fn get_one(
    State(state): State<AppState>,
    user: OptionalUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<DealDto>>, ApiError> {
    let actor = user.actor();
    let deal = state.deals.get(actor.as_ref(), &id).await?;
    Ok(Json(ApiResponse::success(deal.into())))
}

/// Edit - PUT /api/v1/deals/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(details): ApiJson<DealDetails>,
) -> Result<Json<ApiResponse<DealDto>>, ApiError> {
    let deal = state.deals.update(&user.actor(), &id, details).await?;
    Ok(Json(ApiResponse::success(deal.into())))
}

/// Delete - DELETE /api/v1/deals/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.deals.delete(&user.actor(), &id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Deal deleted")))
}

/// Submit for review - POST /api/v1/deals/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<DealDto>>, ApiError> {
    let deal = state.deals.submit_for_review(&user.actor(), &id).await?;
    Ok(Json(ApiResponse::success_with_message(
        deal.into(),
        "Deal submitted for review",
    )))
}

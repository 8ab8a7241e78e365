// ============================================================================
// Launchpad API - Application Handlers
// File: crates/launchpad-api/src/handlers/applications.rs
// ============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use launchpad_core::domain::Application;
use launchpad_core::FieldErrors;
use launchpad_shared::FormData;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, CurrentUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Flatten a JSON object into string form fields. Numbers and booleans are
/// accepted as their text; nulls are dropped.
pub fn form_from_json(object: Map<String, Value>) -> Result<FormData, ApiError> {
    let mut form = FormData::new();
    let mut errors = FieldErrors::new();
    for (key, value) in object {
        match value {
            Value::Null => {}
            Value::String(s) => {
                form.insert(key, s);
            }
            Value::Number(n) => {
                form.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                form.insert(key, b.to_string());
            }
            Value::Array(_) | Value::Object(_) => errors.add(key, "Must be a single value"),
        }
    }
    errors.into_result()?;
    Ok(form)
}

#[derive(Debug, Serialize)]
pub struct ParkedResponse {
    pub pending_application_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub pending_application_token: String,
}

/// Submit handler - POST /api/v1/applications
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<Map<String, Value>>,
) -> Result<(StatusCode, Json<ApiResponse<Application>>), ApiError> {
    let form = form_from_json(payload)?;
    let application = state.applications.submit(&user.actor(), &form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(application))))
}

/// Own applications - GET /api/v1/applications
pub async fn list_mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<Application>>>, ApiError> {
    let applications = state.applications.list_mine(&user.actor()).await?;
    Ok(Json(ApiResponse::success(applications)))
}

/// One application - GET /api/v1/applications/{id}
pub async fn get_one(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Application>>, ApiError> {
    let application = state.applications.get(&user.actor(), &id).await?;
    Ok(Json(ApiResponse::success(application)))
}

/// Park a form for an anonymous visitor - POST /api/v1/applications/pending
pub async fn park(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Map<String, Value>>,
) -> Result<(StatusCode, Json<ApiResponse<ParkedResponse>>), ApiError> {
    let form = form_from_json(payload)?;
    let parked = state.applications.park_pending(&form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            ParkedResponse {
                pending_application_token: parked.token,
                expires_at: parked.expires_at,
            },
            "Sign in or register to submit this application",
        )),
    ))
}

/// Claim a parked form - POST /api/v1/applications/pending/claim
pub async fn claim(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<ClaimRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Application>>), ApiError> {
    let application = state
        .applications
        .claim_pending(&user.actor(), &payload.pending_application_token)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(application))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_from_json_stringifies_scalars() {
        let object = json!({
            "company_name": "Tidepool",
            "funding_amount": 250000,
            "website": null,
            "remote": true
        });
        let Value::Object(map) = object else { unreachable!() };

        let form = form_from_json(map).unwrap();
        assert_eq!(form.get("funding_amount").map(String::as_str), Some("250000"));
        assert_eq!(form.get("remote").map(String::as_str), Some("true"));
        assert!(!form.contains_key("website"));
    }

    #[test]
    fn test_form_from_json_rejects_nested_values() {
        let Value::Object(map) = json!({"stage": ["seed"]}) else { unreachable!() };
        assert!(form_from_json(map).is_err());
    }
}

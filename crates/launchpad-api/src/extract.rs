//! Bearer-token extractors, plus body/path/query extractors whose
//! rejections render as the standard error envelope

use axum::extract::{FromRequest, FromRequestParts, OptionalFromRequest, Request};
use axum::http::{header::AUTHORIZATION, request::Parts};
use serde::de::DeserializeOwned;

use launchpad_core::services::Principal;
use launchpad_core::Actor;

use crate::error::ApiError;
use crate::state::AppState;

fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed authorization header".to_string()))?;
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(Some(token.trim()))
        }
        _ => Err(ApiError::Unauthorized("expected a bearer token".to_string())),
    }
}

/// Requires a valid bearer token
pub struct CurrentUser(pub Principal);

impl CurrentUser {
    pub fn actor(&self) -> Actor {
        self.0.actor()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;
        let principal = state.auth.authenticate(token).await?;
        Ok(CurrentUser(principal))
    }
}

/// Anonymous callers are allowed. A token that is present must still be valid.
pub struct OptionalUser(pub Option<Principal>);

impl OptionalUser {
    pub fn actor(&self) -> Option<Actor> {
        self.0.as_ref().map(Principal::actor)
    }
}

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(OptionalUser(Some(state.auth.authenticate(token).await?))),
            None => Ok(OptionalUser(None)),
        }
    }
}

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// A missing body yields `None`; a present but malformed one is still rejected
impl<T, S> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let json = <axum::Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(json.map(|axum::Json(value)| ApiJson(value)))
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use launchpad_shared::constants::TOKEN_TYPE_ACCESS;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Session the token was issued for; revoking the session revokes the token.
    pub sid: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|e| JwtError::ValidationError(e.to_string()))
    }

    pub fn session_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sid).map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    secret: String,
    access_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: String, access_expiry: i64) -> Self {
        Self {
            secret,
            access_token_expiry: access_expiry,
        }
    }

    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    pub fn generate_access_token(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
        role: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::ValidationError(e.to_string()),
        })?;

        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(JwtError::ValidationError(format!(
                "unexpected token type: {}",
                claims.token_type
            )));
        }
        Ok(claims)
    }
}

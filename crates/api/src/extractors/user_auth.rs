//! User JWT authentication extractor.
//!
//! Provides an Axum extractor for validating Bearer tokens on requests.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use shared::jwt;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated user information from a validated JWT.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User id from the JWT subject claim.
    pub user_id: i64,
    /// JWT ID (jti) for log correlation.
    pub jti: String,
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let claims = state
            .jwt
            .validate_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let user_id = jwt::extract_user_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(UserAuth {
            user_id,
            jti: claims.jti,
        })
    }
}

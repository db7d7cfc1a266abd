//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates it as an access token, and injects the user id.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use uiplat_core::error::AppError;
use uiplat_token::TokenType;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque identifier of the authenticated principal.
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let user_id = state.token_service.validate(token, TokenType::Access)?;

        Ok(AuthUser { user_id })
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format").into())
}

//! Auth handlers — token refresh and caller identity.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use uiplat_core::error::AppError;

use crate::dto::response::{IdentityResponse, TokenPairResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/refresh
///
/// Exchanges a refresh token for a new token pair. The caller presents the
/// original access token (which may already be expired) as the bearer in
/// `Authorization` and the refresh token in the `Refresh-Token` header.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let access_token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("access token is empty"))?;

    let refresh_token = headers
        .get("refresh-token")
        .and_then(|v| v.to_str().ok())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("refresh token is empty"))?;

    let pair = state
        .token_service
        .refresh_tokens(refresh_token, access_token)
        .await?;

    Ok(Json(TokenPairResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        access_expires_at: pair.access_expires_at,
        refresh_expires_at: pair.refresh_expires_at,
    }))
}

/// GET /api/auth/me
///
/// Returns the identity carried by a valid access token. Exists both as a
/// smoke check and as the reference consumer of the `AuthUser` extractor.
pub async fn me(auth: AuthUser) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        user_id: auth.user_id,
    })
}

//! JWT-based device authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fota_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated device extracted from a Bearer token in the
/// `Authorization` header.
///
/// Rejects with 401 when the header is missing or the token does not
/// validate. A valid token without a usable `hw_rev` claim is NOT an
/// authentication failure: `hw_rev` is simply `None` and the firmware
/// resolution downstream treats it as "no compatible firmware."
#[derive(Debug, Clone)]
pub struct DeviceAuth {
    /// Hardware revision from the token's `hw_rev` claim; `None` when
    /// the claim is absent or empty.
    pub hw_rev: Option<String>,
}

impl FromRequestParts<AppState> for DeviceAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(DeviceAuth {
            hw_rev: claims.hw_rev.filter(|rev| !rev.is_empty()),
        })
    }
}

//! Device-token validation.
//!
//! Devices authenticate with HS256-signed JWTs issued by an external
//! provisioning system. This backend only validates them; it never
//! issues tokens. Besides the standard claims, device tokens may carry
//! a `hw_rev` claim naming the device's hardware revision, which drives
//! firmware resolution.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims this backend reads from a device access token.
///
/// Unknown claims are ignored so tokens from the external issuer can
/// carry whatever else it puts in them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Hardware revision of the device the token was issued to.
    /// Absent for credentials that are not tied to a hardware variant.
    #[serde(default)]
    pub hw_rev: Option<String>,
}

/// Configuration for device-token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the token issuer.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self { secret }
    }
}

/// Validate and decode a device token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.required_spec_claims.clear();
    validation.required_spec_claims.insert("exp".to_string());

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

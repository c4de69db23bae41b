//! Access-token issuing and validation.
//!
//! Access tokens are HS256-signed JWTs carrying [`Claims`]. The client decodes
//! the same claims to show who is signed in, so the staff name and email are
//! embedded alongside the role.

use remindcare_core::session::SessionError;
use remindcare_core::token::{encode_token, Claims, TokenCodec};
use remindcare_db::models::staff::StaffAccount;

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret. Never leaves the server.
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// | Env Var                  | Default     |
    /// |--------------------------|-------------|
    /// | `JWT_SECRET`             | (required)  |
    /// | `JWT_ACCESS_EXPIRY_MINS` | `60`        |
    ///
    /// # Panics
    ///
    /// Without a non-empty `JWT_SECRET`, or with an expiry that is not a
    /// whole number of minutes.
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => panic!("JWT_SECRET must be set to a non-empty value"),
        };

        let access_token_expiry_mins = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .unwrap_or_else(|_| panic!("JWT_ACCESS_EXPIRY_MINS is not an integer: '{raw}'"))
            })
            .unwrap_or(DEFAULT_ACCESS_EXPIRY_MINS);

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    /// Token lifetime in seconds, as reported in the login response.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// Issue an access token for `account`.
pub fn generate_access_token(
    account: &StaffAccount,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: account.id.to_string(),
        name: account.name.clone(),
        email: account.email.clone(),
        role: account.role.clone(),
        exp: now + config.expires_in_secs(),
        iat: Some(now),
    };

    encode_token(&claims, &config.secret)
}

/// Check the signature and expiry of an access token.
///
/// Expiry uses the same `exp < now` rule as the client session, so a token
/// the client still considers live is accepted here too.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, SessionError> {
    let claims = TokenCodec::verifying(config.secret.as_str()).decode(token)?;
    if claims.is_expired() {
        return Err(SessionError::Expired { exp: claims.exp });
    }
    Ok(claims)
}

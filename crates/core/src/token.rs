//! Bearer-token claims and the token codec.
//!
//! Tokens are compact JWS strings (`header.claims.signature`, each segment
//! base64url-encoded). The codec only turns a token into [`Claims`]; it never
//! looks at the clock. Expiry is the caller's decision via
//! [`Claims::is_expired_at`].

use std::collections::HashSet;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by every RemindCare access token.
///
/// Claims other than these are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the staff member's user id.
    pub sub: String,
    /// Display name, e.g. `"Dr. Jane Smith"`.
    pub name: String,
    pub email: String,
    /// Authorization role (see [`crate::roles`]).
    pub role: String,
    /// Expiration time (UTC Unix timestamp, seconds).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp, seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// `true` when `exp` lies strictly before `now` (both in seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }

    /// [`Self::is_expired_at`] against the system clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

/// Why a token could not be turned into [`Claims`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The token is not a three-segment JWS, a segment is not valid base64url
    /// JSON, or the claims lack one of `sub`, `name`, `email`, `role`, `exp`.
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// The signature does not match the configured secret.
    #[error("Token signature is invalid")]
    InvalidSignature,
}

impl From<jsonwebtoken::errors::Error> for DecodeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::InvalidSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// Decodes bearer tokens into [`Claims`].
#[derive(Clone)]
pub enum TokenCodec {
    /// Parse the token structure and claims without checking the signature.
    ///
    /// This is what a client without the signing secret can do. It must not
    /// be used where the token is an authorization decision.
    Structural,
    /// Parse the token and require a valid HS256 signature.
    Verifying { secret: String },
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structural => f.write_str("TokenCodec::Structural"),
            Self::Verifying { .. } => f.write_str("TokenCodec::Verifying { .. }"),
        }
    }
}

impl TokenCodec {
    /// Shorthand for [`TokenCodec::Verifying`].
    pub fn verifying(secret: impl Into<String>) -> Self {
        Self::Verifying {
            secret: secret.into(),
        }
    }

    /// Decode `token` into its claims.
    ///
    /// Never checks `exp`; see [`Claims::is_expired_at`].
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        if token.split('.').count() != 3 {
            return Err(DecodeError::Malformed(
                "expected three dot-separated segments".into(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        let key = match self {
            Self::Structural => {
                validation.insecure_disable_signature_validation();
                DecodingKey::from_secret(&[])
            }
            Self::Verifying { secret } => DecodingKey::from_secret(secret.as_bytes()),
        };

        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(data.claims)
    }
}

/// Sign `claims` as an HS256 token.
pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    pub fn claims_expiring_at(exp: i64) -> Claims {
        Claims {
            sub: "123".to_string(),
            name: "Dr. Jane Smith".to_string(),
            email: "doctor@example.com".to_string(),
            role: "doctor".to_string(),
            exp,
            iat: None,
        }
    }

    pub fn token_expiring_at(exp: i64) -> String {
        encode_token(&claims_expiring_at(exp), SECRET).expect("encoding should succeed")
    }

    pub fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::test_support::*;
    use super::*;

    #[test]
    fn structural_decode_reads_all_claims() {
        let exp = future_exp();
        let token = token_expiring_at(exp);

        let claims = TokenCodec::Structural
            .decode(&token)
            .expect("decode should succeed");
        assert_eq!(claims, claims_expiring_at(exp));
    }

    #[test]
    fn structural_decode_ignores_signature() {
        let token = encode_token(&claims_expiring_at(future_exp()), "some-other-secret").unwrap();
        assert!(TokenCodec::Structural.decode(&token).is_ok());
    }

    #[test]
    fn structural_decode_does_not_check_expiry() {
        let claims = TokenCodec::Structural
            .decode(&token_expiring_at(1))
            .expect("expired tokens still decode");
        assert_eq!(claims.exp, 1);
        assert!(claims.is_expired());
    }

    #[test]
    fn verifying_decode_accepts_matching_secret() {
        let token = token_expiring_at(future_exp());
        let claims = TokenCodec::verifying(SECRET).decode(&token).unwrap();
        assert_eq!(claims.sub, "123");
    }

    #[test]
    fn verifying_decode_rejects_wrong_secret() {
        let token = token_expiring_at(future_exp());
        let result = TokenCodec::verifying("secret-bravo").decode(&token);
        assert_matches!(result, Err(DecodeError::InvalidSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_matches!(
            TokenCodec::Structural.decode("not-a-token"),
            Err(DecodeError::Malformed(_))
        );
        assert_matches!(
            TokenCodec::Structural.decode("a.b.c"),
            Err(DecodeError::Malformed(_))
        );
        assert_matches!(TokenCodec::Structural.decode(""), Err(DecodeError::Malformed(_)));
    }

    #[test]
    fn missing_claim_is_malformed() {
        #[derive(Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }
        let token = encode(
            &Header::default(),
            &Partial {
                sub: "1".into(),
                exp: future_exp(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_matches!(
            TokenCodec::Structural.decode(&token),
            Err(DecodeError::Malformed(_))
        );
    }

    #[test]
    fn expiry_boundary_is_strict() {
        let claims = claims_expiring_at(100);
        assert!(!claims.is_expired_at(100));
        assert!(claims.is_expired_at(101));
    }

    #[test]
    fn extra_claims_are_ignored() {
        #[derive(Serialize)]
        struct Extended {
            #[serde(flatten)]
            base: Claims,
            jti: String,
        }
        let token = encode(
            &Header::default(),
            &Extended {
                base: claims_expiring_at(future_exp()),
                jti: "abc".into(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let claims = TokenCodec::Structural.decode(&token).unwrap();
        assert_eq!(claims.name, "Dr. Jane Smith");
    }
}

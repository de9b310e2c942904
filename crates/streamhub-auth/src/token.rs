// JWT issuance and purpose-aware verification

use crate::error::{AuthError, AuthResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use streamhub_commons::UserId;
use streamhub_configs::AuthSettings;

/// Issuer embedded in every token.
pub const TOKEN_ISSUER: &str = "streamhub";

/// Token purpose, distinguishing short-lived access tokens from
/// long-lived, server-persisted refresh tokens.
///
/// Each purpose signs with its own secret and its own lifetime. A
/// refresh token MUST NOT be accepted where an access token is expected,
/// and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPurpose::Access => write!(f, "access"),
            TokenPurpose::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims carried by every streamhub token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Unique token id. Guarantees every issued token is distinct, so
    /// rotation always replaces the stored refresh token with a new
    /// value even within the same clock second.
    pub jti: String,
    /// Token purpose: "access" or "refresh"
    pub token_type: TokenPurpose,
}

/// A freshly signed token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// An access + refresh token pair as returned by login and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

struct PurposeKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl PurposeKeys {
    fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }
}

/// Creates and verifies signed, expiring tokens.
///
/// Constructed once at startup from explicit settings; holds independent
/// HS256 keys and lifetimes per purpose. No ambient configuration is read
/// after construction.
pub struct TokenCodec {
    access: PurposeKeys,
    refresh: PurposeKeys,
}

impl TokenCodec {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            access: PurposeKeys::new(
                &settings.access_token_secret,
                Duration::minutes(settings.access_token_expiry_minutes),
            ),
            refresh: PurposeKeys::new(
                &settings.refresh_token_secret,
                Duration::days(settings.refresh_token_expiry_days),
            ),
        }
    }

    fn keys(&self, purpose: TokenPurpose) -> &PurposeKeys {
        match purpose {
            TokenPurpose::Access => &self.access,
            TokenPurpose::Refresh => &self.refresh,
        }
    }

    /// Sign a new token for `user_id` with the given purpose.
    ///
    /// # Errors
    /// Returns `AuthError::SigningError` if encoding fails; callers treat
    /// this as a server fault, not a client error.
    pub fn issue(&self, user_id: &UserId, purpose: TokenPurpose) -> AuthResult<IssuedToken> {
        let keys = self.keys(purpose);
        let now = Utc::now();
        let expires_at = now + keys.lifetime;

        let claims = Claims {
            sub: user_id.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: purpose,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| AuthError::SigningError(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token against the secret and lifetime of
    /// `expected_purpose` and return the subject id.
    ///
    /// # Errors
    /// - `AuthError::InvalidSignature` if the signature does not match
    ///   the purpose's secret (including tokens signed for the other
    ///   purpose)
    /// - `AuthError::TokenExpired` once the current time reaches `exp`
    /// - `AuthError::MalformedToken` if the string cannot be decoded or
    ///   carries the wrong issuer or purpose claim
    pub fn verify(&self, token: &str, expected_purpose: TokenPurpose) -> AuthResult<UserId> {
        let keys = self.keys(expected_purpose);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // No leeway: a token is rejected at any instant past its expiry.
        validation.leeway = 0;

        let data = decode::<Claims>(token, &keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken(e.to_string()),
            }
        })?;

        let claims = data.claims;

        if claims.iss != TOKEN_ISSUER {
            return Err(AuthError::MalformedToken(format!(
                "unexpected issuer '{}'",
                claims.iss
            )));
        }

        // Belt-and-braces purpose check: with per-purpose secrets a
        // cross-purpose token already fails the signature, but the claim
        // is enforced regardless.
        if claims.token_type != expected_purpose {
            return Err(AuthError::InvalidSignature);
        }

        if claims.sub.is_empty() {
            return Err(AuthError::MalformedToken("missing sub claim".to_string()));
        }

        Ok(UserId::new(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> AuthSettings {
        AuthSettings {
            access_token_secret: "test-access-secret".to_string(),
            refresh_token_secret: "test-refresh-secret".to_string(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let codec = TokenCodec::new(&test_settings());
        let id = UserId::new("user-42");

        for purpose in [TokenPurpose::Access, TokenPurpose::Refresh] {
            let issued = codec.issue(&id, purpose).unwrap();
            let subject = codec.verify(&issued.token, purpose).unwrap();
            assert_eq!(subject, id);
        }
    }

    #[test]
    fn test_consecutive_tokens_are_distinct() {
        let codec = TokenCodec::new(&test_settings());
        let id = UserId::new("user-42");

        let first = codec.issue(&id, TokenPurpose::Refresh).unwrap();
        let second = codec.issue(&id, TokenPurpose::Refresh).unwrap();
        assert_ne!(first.token, second.token);
    }

    #[test]
    fn test_cross_purpose_rejected() {
        let codec = TokenCodec::new(&test_settings());
        let id = UserId::new("user-42");

        let access = codec.issue(&id, TokenPurpose::Access).unwrap();
        let refresh = codec.issue(&id, TokenPurpose::Refresh).unwrap();

        assert_eq!(
            codec.verify(&access.token, TokenPurpose::Refresh),
            Err(AuthError::InvalidSignature)
        );
        assert_eq!(
            codec.verify(&refresh.token, TokenPurpose::Access),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_purpose_claim_enforced_with_shared_secret() {
        // Even if both purposes were configured with one secret, the
        // token_type claim must still reject cross-purpose use.
        let settings = AuthSettings {
            access_token_secret: "shared".to_string(),
            refresh_token_secret: "shared".to_string(),
            ..test_settings()
        };
        let codec = TokenCodec::new(&settings);
        let id = UserId::new("user-42");

        let refresh = codec.issue(&id, TokenPurpose::Refresh).unwrap();
        assert_eq!(
            codec.verify(&refresh.token, TokenPurpose::Access),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let settings = test_settings();
        let codec = TokenCodec::new(&settings);

        // Hand-craft a token whose expiry is already in the past, signed
        // with the correct access secret.
        let now = Utc::now();
        let claims = Claims {
            sub: "user-42".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: (now.timestamp() - 120) as usize,
            exp: (now.timestamp() - 60) as usize,
            jti: "test-jti".to_string(),
            token_type: TokenPurpose::Access,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(settings.access_token_secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            codec.verify(&token, TokenPurpose::Access),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = TokenCodec::new(&test_settings());
        let err = codec
            .verify("not-a-jwt", TokenPurpose::Access)
            .unwrap_err();
        assert!(matches!(err, AuthError::MalformedToken(_)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = TokenCodec::new(&test_settings());
        let issued = codec
            .issue(&UserId::new("user-42"), TokenPurpose::Access)
            .unwrap();

        // Swap the payload segment for a different (valid base64) one.
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let other = codec
            .issue(&UserId::new("user-43"), TokenPurpose::Access)
            .unwrap();
        let other_parts: Vec<&str> = other.token.split('.').collect();
        parts[1] = other_parts[1];
        let tampered = parts.join(".");

        assert_ne!(tampered, issued.token);
        assert_eq!(
            codec.verify(&tampered, TokenPurpose::Access),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let settings = test_settings();
        let codec = TokenCodec::new(&settings);

        let now = Utc::now();
        let claims = Claims {
            sub: "user-42".to_string(),
            iss: "someone-else".to_string(),
            iat: now.timestamp() as usize,
            exp: (now.timestamp() + 600) as usize,
            jti: "test-jti".to_string(),
            token_type: TokenPurpose::Access,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(settings.access_token_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            codec.verify(&token, TokenPurpose::Access),
            Err(AuthError::MalformedToken(_))
        ));
    }
}

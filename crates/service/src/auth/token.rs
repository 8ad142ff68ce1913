use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sellers::errors::SellerError;

/// Signing settings: symmetric secret plus default token lifetime.
/// Loaded once at startup; the secret must never be logged.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self { secret: secret.into(), ttl }
    }

    /// Default lifetime of 30 minutes.
    pub fn with_default_ttl(secret: impl Into<String>) -> Self {
        Self::new(secret, Duration::minutes(30))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// Stateless issuer/validator of HS256 bearer tokens asserting a seller's
/// email as subject. Validity is determined purely by signature and expiry.
#[derive(Clone)]
pub struct TokenIssuer {
    cfg: TokenConfig,
}

impl TokenIssuer {
    pub fn new(cfg: TokenConfig) -> Self {
        Self { cfg }
    }

    /// Issue a signed token for `subject` using the configured lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, SellerError> {
        self.issue_with_ttl(subject, self.cfg.ttl)
    }

    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, SellerError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.cfg.secret.as_bytes()),
        )
        .map_err(|e| SellerError::Token(e.to_string()))
    }

    /// Verify signature and expiry, returning the subject on success.
    ///
    /// Every failure mode collapses into `Unauthorized` so the caller cannot
    /// tell a forged token from an expired one; the distinction only reaches
    /// the debug log.
    pub fn validate(&self, token: &str) -> Result<String, SellerError> {
        let key = DecodingKey::from_secret(self.cfg.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // strict expiry: no clock leeway
        validation.leeway = 0;
        match decode::<Claims>(token, &key, &validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(e) => {
                debug!(error = %e, "token validation failed");
                Err(SellerError::Unauthorized)
            }
        }
    }
}

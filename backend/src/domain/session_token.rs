//! Stateless bearer tokens asserting a username until an expiry instant.
//!
//! Tokens are HS256 JWTs signed with a process-wide secret supplied at
//! construction. There is no revocation list: a token stays valid until
//! `exp` passes, and logging out is a client-side concern.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifetime applied when configuration does not override it.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(10 * 60);

const BEARER_SCHEME: &str = "bearer";

/// Claim set embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time as seconds since the Unix epoch.
    pub iat: i64,
}

impl SessionClaims {
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

/// Reasons a bearer token can be refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("bearer token is missing")]
    Missing,
    #[error("bearer token is malformed or has an invalid signature")]
    Malformed,
    #[error("bearer token has expired")]
    Expired,
    #[error("failed to sign token: {message}")]
    Signing { message: String },
}

/// Outcome of the guard that runs in front of every protected operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Authorized(SessionClaims),
    Rejected(TokenError),
}

/// Token handed back to a client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Issues and validates session tokens.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use crm_backend::domain::{Authorization, SessionTokens, DEFAULT_TOKEN_TTL};
/// use mockable::DefaultClock;
///
/// let tokens = SessionTokens::new(b"secret", DEFAULT_TOKEN_TTL, Arc::new(DefaultClock));
/// let issued = tokens.issue("alice").expect("signing succeeds");
/// let header = format!("Bearer {}", issued.token);
/// assert!(matches!(tokens.authorize(Some(&header)), Authorization::Authorized(_)));
/// ```
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl SessionTokens {
    /// Build a token service around a shared signing secret.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock instead.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Sign a token for `username` expiring one lifetime from now.
    pub fn issue(&self, username: &str) -> Result<IssuedToken, TokenError> {
        let now = self.clock.utc().timestamp();
        let claims = SessionClaims {
            username: username.to_owned(),
            exp: now.saturating_add(self.ttl_secs),
            iat: now,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(
            |err| TokenError::Signing {
                message: err.to_string(),
            },
        )?;
        Ok(IssuedToken { token, claims })
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// A token is accepted up to and including its `exp` second.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation).map_err(
            |err| {
                debug!(error = %err, "token rejected by decoder");
                TokenError::Malformed
            },
        )?;
        if self.clock.utc().timestamp() > data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }

    /// Evaluate an `Authorization` header value.
    pub fn authorize(&self, header: Option<&str>) -> Authorization {
        match bearer_token(header).and_then(|token| self.validate(token)) {
            Ok(claims) => Authorization::Authorized(claims),
            Err(err) => Authorization::Rejected(err),
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. A header using another scheme
/// is treated as malformed; an absent header or empty token as missing.
pub fn bearer_token(header: Option<&str>) -> Result<&str, TokenError> {
    let value = header.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(TokenError::Missing);
    }
    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(TokenError::Malformed);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Missing);
    }
    Ok(token)
}

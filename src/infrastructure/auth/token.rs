//! Signed token issuance and verification
//!
//! Access and refresh tokens share one signed JWT envelope but are distinct
//! claim classes. Callers always receive a tagged [`VerifiedClaims`] value,
//! so refresh tokens cannot pass where an access token is required or the
//! other way around. Token strings are opaque outside this module.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::DomainError;

/// Tolerated clock skew between issuer and verifier, in seconds
const LEEWAY_SECS: u64 = 5;

/// Token class carried inside the signed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Access,
    Refresh,
}

/// Wire-format claims; private to the codec
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    /// Subject (account identity)
    sub: String,
    /// Token class
    class: TokenClass,
    /// Issued at (Unix epoch)
    iat: i64,
    /// Expiration (Unix epoch)
    exp: i64,
    /// Unique token identifier, refresh tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    jti: Option<Uuid>,
}

/// Verified access-token claims
#[derive(Debug, Clone)]
pub struct AccessClaims {
    pub account_id: AccountId,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Verified refresh-token claims
#[derive(Debug, Clone)]
pub struct RefreshClaims {
    pub account_id: AccountId,
    pub issued_at: i64,
    pub expires_at: i64,
    pub jti: Uuid,
}

/// Outcome of a successful verification, tagged by class
#[derive(Debug, Clone)]
pub enum VerifiedClaims {
    Access(AccessClaims),
    Refresh(RefreshClaims),
}

impl VerifiedClaims {
    /// Require the access class; anything else is an invalid token
    pub fn into_access(self) -> Result<AccessClaims, DomainError> {
        match self {
            Self::Access(claims) => Ok(claims),
            Self::Refresh(_) => Err(DomainError::InvalidToken),
        }
    }

    /// Require the refresh class; anything else is an invalid token
    pub fn into_refresh(self) -> Result<RefreshClaims, DomainError> {
        match self {
            Self::Refresh(claims) => Ok(claims),
            Self::Access(_) => Err(DomainError::InvalidToken),
        }
    }
}

/// Codec for issuing and verifying signed, expiring tokens.
///
/// Holds the process-wide signing secret, injected once at startup.
/// Verification is pure: signature plus expiry, no lookups.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenCodec {
    /// Create a codec from the signing secret and the two TTLs
    pub fn new(secret: &str, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::seconds(access_ttl_secs as i64),
            refresh_ttl: Duration::seconds(refresh_ttl_secs as i64),
        }
    }

    /// Issue a short-lived access token for an account
    pub fn issue_access(&self, account_id: &AccountId) -> Result<String, DomainError> {
        self.issue(account_id, TokenClass::Access, self.access_ttl, None)
    }

    /// Issue a long-lived refresh token carrying the given jti
    pub fn issue_refresh(&self, account_id: &AccountId, jti: Uuid) -> Result<String, DomainError> {
        self.issue(account_id, TokenClass::Refresh, self.refresh_ttl, Some(jti))
    }

    fn issue(
        &self,
        account_id: &AccountId,
        class: TokenClass,
        ttl: Duration,
        jti: Option<Uuid>,
    ) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = WireClaims {
            sub: account_id.as_str().to_string(),
            class,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify signature and expiry, returning the tagged claims.
    ///
    /// Expired tokens fail with `TokenExpired`; a bad signature, a malformed
    /// payload, or a refresh token missing its jti fail with `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, DomainError> {
        let mut validation = Validation::default();
        validation.leeway = LEEWAY_SECS;

        let data = decode::<WireClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::TokenExpired,
                _ => DomainError::InvalidToken,
            }
        })?;

        let claims = data.claims;
        let account_id = AccountId::new(claims.sub).map_err(|_| DomainError::InvalidToken)?;

        match claims.class {
            TokenClass::Access => Ok(VerifiedClaims::Access(AccessClaims {
                account_id,
                issued_at: claims.iat,
                expires_at: claims.exp,
            })),
            TokenClass::Refresh => {
                let jti = claims.jti.ok_or(DomainError::InvalidToken)?;
                Ok(VerifiedClaims::Refresh(RefreshClaims {
                    account_id,
                    issued_at: claims.iat,
                    expires_at: claims.exp,
                    jti,
                }))
            }
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

//! Authentication service
//!
//! Orchestrates the account repository, password hasher, token codec and
//! refresh-session registry behind the register/login/refresh/logout
//! operations.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::account::{validate_password, Account, AccountId, AccountRepository};
use crate::domain::session::{RefreshSession, SessionRepository};
use crate::domain::DomainError;

use super::password::{dummy_hash, PasswordHasher};
use super::token::TokenCodec;

/// Access/refresh token pair returned by login and refresh
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service
#[derive(Debug, Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn PasswordHasher>,
    codec: TokenCodec,
    /// When set, detected refresh-token reuse revokes every outstanding
    /// session for the affected account.
    revoke_on_reuse: bool,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: Arc<dyn PasswordHasher>,
        codec: TokenCodec,
    ) -> Self {
        Self {
            accounts,
            sessions,
            hasher,
            codec,
            revoke_on_reuse: false,
        }
    }

    /// Enable session-wide revocation on refresh-token reuse
    pub fn with_revoke_on_reuse(mut self, enabled: bool) -> Self {
        self.revoke_on_reuse = enabled;
        self
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Register a new account.
    ///
    /// Uniqueness rides entirely on the repository's atomic insert-if-absent;
    /// there is no read-then-insert window for two registrations to race
    /// through.
    pub async fn register(&self, identity: &str, password: &str) -> Result<Account, DomainError> {
        let account_id =
            AccountId::new(identity).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        let password_hash = self.hasher.hash(password)?;
        let account = Account::new(account_id, password_hash);

        self.accounts.insert(account).await
    }

    /// Authenticate with identity and password, issuing a token pair.
    ///
    /// Fails uniformly with `InvalidCredentials` whether the identity is
    /// unknown or the password mismatches; the unknown-identity path still
    /// pays for an Argon2 verification so both failures share a latency
    /// profile.
    pub async fn login(&self, identity: &str, password: &str) -> Result<TokenPair, DomainError> {
        let account = match AccountId::new(identity) {
            Ok(id) => self.accounts.get(&id).await?,
            Err(_) => None,
        };

        let account = match account {
            Some(account) => account,
            None => {
                self.hasher.verify(password, dummy_hash());
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, account.password_hash()) {
            return Err(DomainError::InvalidCredentials);
        }

        self.issue_pair(account.id().clone()).await
    }

    /// Exchange a valid refresh token for a fresh access/refresh pair,
    /// rotating the registered jti.
    ///
    /// Replay of an already-rotated token fails with `TokenReused`; with the
    /// reuse policy enabled that also revokes every session the account
    /// still holds, on the assumption that the token leaked.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.codec.verify(refresh_token)?.into_refresh()?;

        let new_jti = match self.sessions.rotate(claims.jti).await {
            Ok(jti) => jti,
            Err(DomainError::TokenReused) => {
                warn!(account = %claims.account_id, "refresh token reuse detected");

                if self.revoke_on_reuse {
                    let revoked = self.sessions.revoke_all_for(&claims.account_id).await?;
                    warn!(
                        account = %claims.account_id,
                        revoked, "revoked all sessions after token reuse"
                    );
                }

                return Err(DomainError::TokenReused);
            }
            Err(e) => return Err(e),
        };

        let access_token = self.codec.issue_access(&claims.account_id)?;
        let refresh_token = self.codec.issue_refresh(&claims.account_id, new_jti)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Revoke the refresh token's session. Idempotent: logging out with an
    /// already-revoked or unknown jti succeeds.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), DomainError> {
        let claims = self.codec.verify(refresh_token)?.into_refresh()?;
        self.sessions.revoke(claims.jti).await
    }

    async fn issue_pair(&self, account_id: AccountId) -> Result<TokenPair, DomainError> {
        let session = RefreshSession::new(account_id.clone());
        self.sessions
            .register(session.jti(), account_id.clone())
            .await?;

        let access_token = self.codec.issue_access(&account_id)?;
        let refresh_token = self.codec.issue_refresh(&account_id, session.jti())?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::account::InMemoryAccountRepository;
    use crate::infrastructure::auth::password::Argon2Hasher;
    use crate::infrastructure::session::InMemorySessionRepository;

    fn service() -> AuthService {
        service_with_policy(false)
    }

    fn service_with_policy(revoke_on_reuse: bool) -> AuthService {
        AuthService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(Argon2Hasher::new()),
            TokenCodec::new("test-secret", 900, 1_209_600),
        )
        .with_revoke_on_reuse(revoke_on_reuse)
    }

    #[tokio::test]
    async fn test_register() {
        let service = service();

        let account = service.register("alice", "password123").await.unwrap();
        assert_eq!(account.id().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_register_duplicate_identity() {
        let service = service();

        service.register("alice", "password123").await.unwrap();

        let result = service.register("alice", "other_password").await;
        assert!(matches!(result, Err(DomainError::IdentityTaken { .. })));

        // First registration's credential is unaffected
        assert!(service.login("alice", "password123").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let service = service();

        let result = service.register("alice", "short").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_login_success() {
        let service = service();
        service.register("alice", "password123").await.unwrap();

        let pair = service.login("alice", "password123").await.unwrap();

        let access = service
            .codec()
            .verify(&pair.access_token)
            .unwrap()
            .into_access()
            .unwrap();
        assert_eq!(access.account_id.as_str(), "alice");

        let refresh = service
            .codec()
            .verify(&pair.refresh_token)
            .unwrap()
            .into_refresh()
            .unwrap();
        assert_eq!(refresh.account_id.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let service = service();
        service.register("alice", "password123").await.unwrap();

        let wrong_password = service.login("alice", "wrong_password").await;
        let unknown_identity = service.login("mallory", "password123").await;

        assert!(matches!(wrong_password, Err(DomainError::InvalidCredentials)));
        assert!(matches!(unknown_identity, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_refresh_rotation() {
        let service = service();
        service.register("alice", "password123").await.unwrap();

        let pair1 = service.login("alice", "password123").await.unwrap();
        let pair2 = service.refresh(&pair1.refresh_token).await.unwrap();

        // Replaying the rotated token is reuse
        let replay = service.refresh(&pair1.refresh_token).await;
        assert!(matches!(replay, Err(DomainError::TokenReused)));

        // The descendant still works
        assert!(service.refresh(&pair2.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let service = service();
        service.register("alice", "password123").await.unwrap();

        let pair = service.login("alice", "password123").await.unwrap();

        let result = service.refresh(&pair.access_token).await;
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_refresh_malformed_token() {
        let service = service();

        let result = service.refresh("garbage").await;
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_reuse_revokes_all_sessions_when_enabled() {
        let service = service_with_policy(true);
        service.register("alice", "password123").await.unwrap();

        // Two live sessions for the same account
        let pair_a = service.login("alice", "password123").await.unwrap();
        let pair_b = service.login("alice", "password123").await.unwrap();

        // Rotate A, then replay A's old token: reuse detected
        let rotated = service.refresh(&pair_a.refresh_token).await.unwrap();
        let replay = service.refresh(&pair_a.refresh_token).await;
        assert!(matches!(replay, Err(DomainError::TokenReused)));

        // The cascade revoked B's session and A's descendant
        let b_after = service.refresh(&pair_b.refresh_token).await;
        assert!(matches!(b_after, Err(DomainError::TokenReused)));

        let rotated_after = service.refresh(&rotated.refresh_token).await;
        assert!(matches!(rotated_after, Err(DomainError::TokenReused)));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let service = service();
        service.register("alice", "password123").await.unwrap();

        let pair = service.login("alice", "password123").await.unwrap();

        service.logout(&pair.refresh_token).await.unwrap();
        // Second logout with the same token is not an error
        service.logout(&pair.refresh_token).await.unwrap();

        // But the session is gone
        let result = service.refresh(&pair.refresh_token).await;
        assert!(matches!(result, Err(DomainError::TokenReused)));
    }

    #[tokio::test]
    async fn test_logout_malformed_token() {
        let service = service();

        let result = service.logout("garbage").await;
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }
}

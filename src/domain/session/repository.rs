//! Refresh session registry trait

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::DomainError;

/// Registry of refresh-token jtis.
///
/// `rotate` is the one operation with a real atomicity obligation: it must
/// revoke the old jti and register the replacement as a single
/// check-and-swap. When two refresh calls race on the same jti, exactly one
/// rotation wins; the loser fails with `TokenReused` and the winner's new
/// jti is the sole valid descendant.
#[async_trait]
pub trait SessionRepository: Send + Sync + Debug {
    /// Register a fresh jti for an account
    async fn register(&self, jti: Uuid, account_id: AccountId) -> Result<(), DomainError>;

    /// Check whether a jti is registered and not revoked
    async fn is_valid(&self, jti: Uuid) -> Result<bool, DomainError>;

    /// Revoke a jti. Revoking an unknown or already-revoked jti is not an
    /// error; logout is idempotent.
    async fn revoke(&self, jti: Uuid) -> Result<(), DomainError>;

    /// Atomically revoke `old_jti` and register a replacement for the same
    /// account, returning the new jti. Fails with `TokenReused` when
    /// `old_jti` is unknown or already revoked, leaving the registry
    /// unchanged.
    async fn rotate(&self, old_jti: Uuid) -> Result<Uuid, DomainError>;

    /// Revoke every live session belonging to an account. Used as the
    /// response policy when refresh-token reuse is detected.
    async fn revoke_all_for(&self, account_id: &AccountId) -> Result<u64, DomainError>;
}

//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, AccountId};
use crate::domain::DomainError;

/// Repository trait for account storage.
///
/// `insert` is an atomic insert-if-absent: when two concurrent
/// registrations race on the same identity, exactly one succeeds and the
/// other fails with `IdentityTaken`.
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Insert a new account; fails with `IdentityTaken` on duplicate identity
    async fn insert(&self, account: Account) -> Result<Account, DomainError>;

    /// Get an account by identity
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;
}

//! Refresh session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::AccountId;

/// One registered refresh token instance, keyed by its jti.
///
/// Access tokens are deliberately absent from this registry: their validity
/// is signature plus expiry only, so verification never needs a lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSession {
    jti: Uuid,
    account_id: AccountId,
    revoked: bool,
    created_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Register a new session with a fresh jti
    pub fn new(account_id: AccountId) -> Self {
        Self {
            jti: Uuid::new_v4(),
            account_id,
            revoked: false,
            created_at: Utc::now(),
        }
    }

    /// Restore a session from stored fields
    pub fn from_parts(
        jti: Uuid,
        account_id: AccountId,
        revoked: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            jti,
            account_id,
            revoked,
            created_at,
        }
    }

    pub fn jti(&self) -> Uuid {
        self.jti
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Mark this session as spent
    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}

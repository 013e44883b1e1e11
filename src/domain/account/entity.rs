//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_account_id, AccountValidationError};

/// Account identifier - alphanumeric plus `._-`, 3 to 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create a new AccountId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, AccountValidationError> {
        let id = id.into();
        validate_account_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account entity holding the login credential. Serialize-only: accounts
/// are restored from storage via `from_parts`, never parsed from input,
/// so the hash cannot arrive from an untrusted payload.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique, immutable identity
    id: AccountId,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    pub fn new(id: AccountId, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Restore an account from stored fields
    pub fn from_parts(
        id: AccountId,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            password_hash: password_hash.into(),
            created_at,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_valid() {
        let id = AccountId::new("alice").unwrap();
        assert_eq!(id.as_str(), "alice");
    }

    #[test]
    fn test_account_id_with_separators() {
        assert!(AccountId::new("user-123").is_ok());
        assert!(AccountId::new("user.name").is_ok());
        assert!(AccountId::new("user_name").is_ok());
    }

    #[test]
    fn test_account_id_invalid() {
        assert!(AccountId::new("").is_err());
        assert!(AccountId::new("ab").is_err());
        assert!(AccountId::new("has space").is_err());
        assert!(AccountId::new("a".repeat(51)).is_err());
    }

    #[test]
    fn test_account_creation() {
        let id = AccountId::new("alice").unwrap();
        let account = Account::new(id, "hashed_password");

        assert_eq!(account.id().as_str(), "alice");
        assert_eq!(account.password_hash(), "hashed_password");
    }

    #[test]
    fn test_account_serialization_excludes_hash() {
        let id = AccountId::new("alice").unwrap();
        let account = Account::new(id, "hashed_password");

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
    }
}

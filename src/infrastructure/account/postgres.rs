//! PostgreSQL account repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of AccountRepository.
///
/// Insert-if-absent is delegated to the primary-key constraint on
/// `accounts.id`; a duplicate-key violation maps to `IdentityTaken`.
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, password_hash, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(account.id().as_str())
        .bind(account.password_hash())
        .bind(account.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::identity_taken(account.id().as_str())
            } else {
                DomainError::storage(format!("Failed to insert account: {}", e))
            }
        })?;

        Ok(account)
    }

    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, password_hash, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> Result<Account, DomainError> {
    let id: String = row.get("id");
    let password_hash: String = row.get("password_hash");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let account_id = AccountId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid account ID in database: {}", e)))?;

    Ok(Account::from_parts(account_id, password_hash, created_at))
}

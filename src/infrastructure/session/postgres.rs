//! PostgreSQL refresh-session registry implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::session::SessionRepository;
use crate::domain::DomainError;

/// PostgreSQL implementation of SessionRepository.
///
/// Rotation is a conditional UPDATE (`… WHERE jti = $1 AND NOT revoked`)
/// and the replacement INSERT inside one transaction: the row-level lock
/// taken by the UPDATE serializes racing rotations of the same jti, and
/// zero affected rows means the token was already spent.
#[derive(Debug, Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn register(&self, jti: Uuid, account_id: AccountId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_sessions (jti, account_id, revoked, created_at)
            VALUES ($1, $2, FALSE, NOW())
            "#,
        )
        .bind(jti)
        .bind(account_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to register session: {}", e)))?;

        Ok(())
    }

    async fn is_valid(&self, jti: Uuid) -> Result<bool, DomainError> {
        let valid: Option<bool> = sqlx::query_scalar(
            "SELECT NOT revoked FROM refresh_sessions WHERE jti = $1",
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check session: {}", e)))?;

        Ok(valid.unwrap_or(false))
    }

    async fn revoke(&self, jti: Uuid) -> Result<(), DomainError> {
        // No error on zero rows: revoking an unknown jti is a no-op
        sqlx::query("UPDATE refresh_sessions SET revoked = TRUE WHERE jti = $1")
            .bind(jti)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to revoke session: {}", e)))?;

        Ok(())
    }

    async fn rotate(&self, old_jti: Uuid) -> Result<Uuid, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin rotation: {}", e)))?;

        let account_id: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE refresh_sessions
            SET revoked = TRUE
            WHERE jti = $1 AND NOT revoked
            RETURNING account_id
            "#,
        )
        .bind(old_jti)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to rotate session: {}", e)))?;

        let Some(account_id) = account_id else {
            // Transaction drops here, leaving the registry unchanged
            return Err(DomainError::TokenReused);
        };

        let new_jti = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO refresh_sessions (jti, account_id, revoked, created_at)
            VALUES ($1, $2, FALSE, NOW())
            "#,
        )
        .bind(new_jti)
        .bind(&account_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to register rotated session: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit rotation: {}", e)))?;

        Ok(new_jti)
    }

    async fn revoke_all_for(&self, account_id: &AccountId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_sessions SET revoked = TRUE WHERE account_id = $1 AND NOT revoked",
        )
        .bind(account_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to revoke sessions: {}", e)))?;

        Ok(result.rows_affected())
    }
}

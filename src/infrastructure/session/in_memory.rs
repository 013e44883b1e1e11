//! In-memory refresh-session registry implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::session::{RefreshSession, SessionRepository};
use crate::domain::DomainError;

/// In-memory implementation of SessionRepository.
///
/// A single mutex over the whole map makes `rotate` a check-and-swap:
/// concurrent rotations of the same jti serialize, one wins, the rest see
/// the revoked row and fail with `TokenReused`.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<Uuid, RefreshSession>>>,
}

impl InMemorySessionRepository {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop revoked rows; housekeeping only, never required for correctness
    pub async fn purge_revoked(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_revoked());
        before - sessions.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(&self, jti: Uuid, account_id: AccountId) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            jti,
            RefreshSession::from_parts(jti, account_id, false, chrono::Utc::now()),
        );
        Ok(())
    }

    async fn is_valid(&self, jti: Uuid) -> Result<bool, DomainError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(&jti).is_some_and(|s| !s.is_revoked()))
    }

    async fn revoke(&self, jti: Uuid) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().await;

        if let Some(session) = sessions.get_mut(&jti) {
            session.revoke();
        }

        Ok(())
    }

    async fn rotate(&self, old_jti: Uuid) -> Result<Uuid, DomainError> {
        let mut sessions = self.sessions.lock().await;

        let account_id = match sessions.get_mut(&old_jti) {
            Some(session) if !session.is_revoked() => {
                let account_id = session.account_id().clone();
                session.revoke();
                account_id
            }
            _ => return Err(DomainError::TokenReused),
        };

        let replacement = RefreshSession::new(account_id);
        let new_jti = replacement.jti();
        sessions.insert(new_jti, replacement);

        Ok(new_jti)
    }

    async fn revoke_all_for(&self, account_id: &AccountId) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let mut revoked = 0;

        for session in sessions.values_mut() {
            if session.account_id() == account_id && !session.is_revoked() {
                session.revoke();
                revoked += 1;
            }
        }

        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AccountId {
        AccountId::new("alice").unwrap()
    }

    #[tokio::test]
    async fn test_register_and_is_valid() {
        let repo = InMemorySessionRepository::new();
        let jti = Uuid::new_v4();

        repo.register(jti, alice()).await.unwrap();
        assert!(repo.is_valid(jti).await.unwrap());
        assert!(!repo.is_valid(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let repo = InMemorySessionRepository::new();
        let jti = Uuid::new_v4();

        repo.register(jti, alice()).await.unwrap();

        repo.revoke(jti).await.unwrap();
        repo.revoke(jti).await.unwrap();
        repo.revoke(Uuid::new_v4()).await.unwrap();

        assert!(!repo.is_valid(jti).await.unwrap());
    }

    #[tokio::test]
    async fn test_rotate() {
        let repo = InMemorySessionRepository::new();
        let jti = Uuid::new_v4();

        repo.register(jti, alice()).await.unwrap();

        let new_jti = repo.rotate(jti).await.unwrap();
        assert_ne!(new_jti, jti);
        assert!(!repo.is_valid(jti).await.unwrap());
        assert!(repo.is_valid(new_jti).await.unwrap());
    }

    #[tokio::test]
    async fn test_rotate_revoked_jti_is_reuse() {
        let repo = InMemorySessionRepository::new();
        let jti = Uuid::new_v4();

        repo.register(jti, alice()).await.unwrap();
        repo.rotate(jti).await.unwrap();

        let result = repo.rotate(jti).await;
        assert!(matches!(result, Err(DomainError::TokenReused)));
    }

    #[tokio::test]
    async fn test_rotate_unknown_jti_is_reuse() {
        let repo = InMemorySessionRepository::new();

        let result = repo.rotate(Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::TokenReused)));
    }

    #[tokio::test]
    async fn test_concurrent_rotation_single_winner() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let jti = Uuid::new_v4();

        repo.register(jti, alice()).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.rotate(jti).await }));
        }

        let mut winners = 0;
        let mut losers = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(DomainError::TokenReused) => losers += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(losers, 7);
    }

    #[tokio::test]
    async fn test_revoke_all_for() {
        let repo = InMemorySessionRepository::new();
        let bob = AccountId::new("bob").unwrap();

        let a1 = Uuid::new_v4();
        let a2 = Uuid::new_v4();
        let b1 = Uuid::new_v4();

        repo.register(a1, alice()).await.unwrap();
        repo.register(a2, alice()).await.unwrap();
        repo.register(b1, bob.clone()).await.unwrap();

        let revoked = repo.revoke_all_for(&alice()).await.unwrap();
        assert_eq!(revoked, 2);

        assert!(!repo.is_valid(a1).await.unwrap());
        assert!(!repo.is_valid(a2).await.unwrap());
        assert!(repo.is_valid(b1).await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_revoked() {
        let repo = InMemorySessionRepository::new();
        let jti = Uuid::new_v4();

        repo.register(jti, alice()).await.unwrap();
        repo.rotate(jti).await.unwrap();

        let purged = repo.purge_revoked().await;
        assert_eq!(purged, 1);
    }
}

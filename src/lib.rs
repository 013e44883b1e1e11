//! TaskFlow API
//!
//! A task tracking service with token-based authentication:
//! - Argon2 password hashing with uniform login failures
//! - Stateless access tokens, stateful refresh tokens with rotation
//! - Refresh-token reuse detection with an optional revoke-all policy
//! - Ownership-scoped task CRUD

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use api::state::AppState;
use domain::account::AccountRepository;
use domain::session::SessionRepository;
use domain::task::TaskRepository;
use infrastructure::account::{InMemoryAccountRepository, PostgresAccountRepository};
use infrastructure::auth::{Argon2Hasher, AuthService, TokenCodec};
use infrastructure::session::{InMemorySessionRepository, PostgresSessionRepository};
use infrastructure::task::{InMemoryTaskRepository, PostgresTaskRepository, TaskService};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let use_postgres = config.storage.backend.eq_ignore_ascii_case("postgres");

    info!("Storage backend: {}", config.storage.backend);

    let (accounts, sessions, tasks): (
        Arc<dyn AccountRepository>,
        Arc<dyn SessionRepository>,
        Arc<dyn TaskRepository>,
    ) = if use_postgres {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        info!("Connecting to PostgreSQL...");
        let pg_pool = sqlx::PgPool::connect(&database_url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
        info!("PostgreSQL connection established");

        infrastructure::migrations::PostgresMigrator::new(pg_pool.clone())
            .run_all()
            .await?;

        (
            Arc::new(PostgresAccountRepository::new(pg_pool.clone())),
            Arc::new(PostgresSessionRepository::new(pg_pool.clone())),
            Arc::new(PostgresTaskRepository::new(pg_pool)),
        )
    } else {
        (
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
        )
    };

    let codec = create_token_codec(config);

    let auth_service = AuthService::new(accounts, sessions, Arc::new(Argon2Hasher::new()), codec)
        .with_revoke_on_reuse(config.auth.revoke_on_reuse);
    let task_service = TaskService::new(tasks);

    Ok(AppState::new(auth_service, task_service))
}

/// Create the token codec from the configured secret, or a random one
fn create_token_codec(config: &AppConfig) -> TokenCodec {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            warn!(
                "No JWT_SECRET configured. Generating random secret. \
                Tokens will NOT survive restarts. \
                Set the JWT_SECRET environment variable for persistent sessions."
            );
            generate_random_secret()
        });

    TokenCodec::new(
        &secret,
        config.auth.access_ttl_secs,
        config.auth.refresh_ttl_secs,
    )
}

/// Generate a random signing secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_secret_length() {
        let secret = generate_random_secret();
        assert_eq!(secret.len(), 64);
    }

    #[tokio::test]
    async fn test_create_app_state_in_memory() {
        let config = AppConfig::default();
        let state = create_app_state(&config).await.unwrap();

        let account = state
            .auth_service
            .register("alice", "password123")
            .await
            .unwrap();
        assert_eq!(account.id().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_full_session_lifecycle() {
        use domain::task::{Page, TaskFilter, TaskStatus};
        use domain::DomainError;
        use infrastructure::task::CreateTaskRequest;

        let state = create_app_state(&AppConfig::default()).await.unwrap();
        let codec = state.auth_service.codec();

        state
            .auth_service
            .register("alice", "password123")
            .await
            .unwrap();
        let pair = state
            .auth_service
            .login("alice", "password123")
            .await
            .unwrap();

        // The access token identifies the caller without any lookup
        let caller = codec
            .verify(&pair.access_token)
            .unwrap()
            .into_access()
            .unwrap()
            .account_id;

        let task = state
            .task_service
            .create(
                &caller,
                CreateTaskRequest {
                    title: "write report".to_string(),
                    description: None,
                    priority: None,
                    due_date: None,
                },
            )
            .await
            .unwrap();

        let tasks = state
            .task_service
            .list(&caller, TaskFilter::default(), Page::default())
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);

        // Rotate the refresh token, then keep working with the new pair
        let rotated = state
            .auth_service
            .refresh(&pair.refresh_token)
            .await
            .unwrap();

        let caller_after = codec
            .verify(&rotated.access_token)
            .unwrap()
            .into_access()
            .unwrap()
            .account_id;
        let found = state
            .task_service
            .get(&caller_after, task.id())
            .await
            .unwrap();
        assert_eq!(found.status(), TaskStatus::Pending);

        // Replaying the pre-rotation refresh token is reuse
        let replay = state.auth_service.refresh(&pair.refresh_token).await;
        assert!(matches!(replay, Err(DomainError::TokenReused)));
    }
}

//! Authentication API endpoints
//!
//! Registration, login, refresh-token rotation and logout.

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::auth::TokenPair;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

/// Identity and password credentials
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub identity: String,
    pub password: String,
}

/// Request carrying a refresh token
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Account response (safe to expose)
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub created_at: String,
}

impl AccountResponse {
    fn from_account(account: &crate::domain::account::Account) -> Self {
        Self {
            id: account.id().as_str().to_string(),
            created_at: account.created_at().to_rfc3339(),
        }
    }
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let account = state
        .auth_service
        .register(&request.identity, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from_account(&account))))
}

/// Login with identity and password
///
/// POST /auth/login
///
/// Returns an access/refresh token pair on success.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state
        .auth_service
        .login(&request.identity, &request.password)
        .await?;

    Ok(Json(pair))
}

/// Exchange a refresh token for a fresh pair
///
/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state.auth_service.refresh(&request.refresh_token).await?;

    Ok(Json(pair))
}

/// Revoke a refresh token's session
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<LogoutResponse>, ApiError> {
    state.auth_service.logout(&request.refresh_token).await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

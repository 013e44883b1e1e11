//! Versioned API surface

pub mod tasks;

use axum::Router;

use super::state::AppState;

/// Create the v1 router
pub fn create_v1_router() -> Router<AppState> {
    Router::new().merge(tasks::create_tasks_router())
}

//! Application state for shared services

use crate::infrastructure::auth::AuthService;
use crate::infrastructure::task::TaskService;

/// Application state shared across request handlers.
///
/// Both services are cheap to clone: they hold `Arc`s to their repositories
/// internally.
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub task_service: TaskService,
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(auth_service: AuthService, task_service: TaskService) -> Self {
        Self {
            auth_service,
            task_service,
        }
    }
}

//! Task CRUD endpoints
//!
//! Every handler requires an access token; the authenticated account scopes
//! all storage access, so callers only ever see their own tasks.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::Authenticated;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::task::{Page, Task, TaskFilter, TaskId, TaskPriority, TaskStatus};
use crate::infrastructure::task::{CreateTaskRequest, TaskPatch};

/// Create the tasks router
pub fn create_tasks_router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
}

/// Query parameters for task listings
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListTasksQuery {
    fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            priority: self.priority,
        }
    }

    fn page(&self) -> Page {
        Page::new(
            self.limit.unwrap_or(Page::DEFAULT_LIMIT),
            self.offset.unwrap_or(0),
        )
    }
}

/// Create a task
///
/// POST /v1/tasks
pub async fn create_task(
    Authenticated(account_id): Authenticated,
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.task_service.create(&account_id, request).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List the caller's tasks
///
/// GET /v1/tasks?status=&priority=&limit=&offset=
pub async fn list_tasks(
    Authenticated(account_id): Authenticated,
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .task_service
        .list(&account_id, query.filter(), query.page())
        .await?;

    Ok(Json(tasks))
}

/// Get a single task
///
/// GET /v1/tasks/{id}
pub async fn get_task(
    Authenticated(account_id): Authenticated,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .task_service
        .get(&account_id, TaskId::from(id))
        .await?;

    Ok(Json(task))
}

/// Partially update a task
///
/// PATCH /v1/tasks/{id}
pub async fn update_task(
    Authenticated(account_id): Authenticated,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .task_service
        .update(&account_id, TaskId::from(id), patch)
        .await?;

    Ok(Json(task))
}

/// Delete a task
///
/// DELETE /v1/tasks/{id}
pub async fn delete_task(
    Authenticated(account_id): Authenticated,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .task_service
        .delete(&account_id, TaskId::from(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = ListTasksQuery::default();

        let page = query.page();
        assert_eq!(page.limit, Page::DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);

        let filter = query.filter();
        assert!(filter.status.is_none());
        assert!(filter.priority.is_none());
    }

    #[test]
    fn test_query_limit_is_clamped() {
        let query = ListTasksQuery {
            limit: Some(100_000),
            ..Default::default()
        };

        assert_eq!(query.page().limit, Page::MAX_LIMIT);
    }

    #[test]
    fn test_query_deserialization() {
        let query: ListTasksQuery =
            serde_urlencoded::from_str("status=in_progress&priority=high&limit=10").unwrap();

        assert_eq!(query.status, Some(TaskStatus::InProgress));
        assert_eq!(query.priority, Some(TaskPriority::High));
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, None);
    }
}

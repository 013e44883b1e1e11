//! Task service
//!
//! Validates input and applies the caller's identity as the ownership scope
//! on every repository call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::domain::account::AccountId;
use crate::domain::task::{
    validate_description, validate_title, Page, Task, TaskFilter, TaskId, TaskPriority,
    TaskRepository, TaskStatus,
};
use crate::domain::DomainError;

/// Fields accepted when creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update: absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Task service
#[derive(Debug, Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Create a task owned by the caller
    pub async fn create(
        &self,
        owner: &AccountId,
        request: CreateTaskRequest,
    ) -> Result<Task, DomainError> {
        validate_title(&request.title).map_err(|e| DomainError::validation(e.to_string()))?;
        if let Some(description) = &request.description {
            validate_description(description)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let mut task = Task::new(owner.clone(), request.title);
        if let Some(description) = request.description {
            task = task.with_description(description);
        }
        if let Some(priority) = request.priority {
            task = task.with_priority(priority);
        }
        if let Some(due_date) = request.due_date {
            task = task.with_due_date(due_date);
        }

        debug!(owner = %owner, task_id = %task.id(), "creating task");

        self.tasks.insert(task).await
    }

    /// Get one of the caller's tasks
    pub async fn get(&self, owner: &AccountId, id: TaskId) -> Result<Task, DomainError> {
        self.tasks
            .get(owner, id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Task '{}' not found", id)))
    }

    /// List the caller's tasks
    pub async fn list(
        &self,
        owner: &AccountId,
        filter: TaskFilter,
        page: Page,
    ) -> Result<Vec<Task>, DomainError> {
        self.tasks.list(owner, filter, page).await
    }

    /// Apply a partial update to one of the caller's tasks.
    /// The owner is not a patchable field.
    pub async fn update(
        &self,
        owner: &AccountId,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, DomainError> {
        if let Some(title) = &patch.title {
            validate_title(title).map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(description) = &patch.description {
            validate_description(description)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let mut task = self.get(owner, id).await?;

        if let Some(title) = patch.title {
            task.set_title(title);
        }
        if let Some(description) = patch.description {
            task.set_description(Some(description));
        }
        if let Some(status) = patch.status {
            task.set_status(status);
        }
        if let Some(priority) = patch.priority {
            task.set_priority(priority);
        }
        if let Some(due_date) = patch.due_date {
            task.set_due_date(Some(due_date));
        }

        self.tasks.update(&task).await
    }

    /// Delete one of the caller's tasks
    pub async fn delete(&self, owner: &AccountId, id: TaskId) -> Result<(), DomainError> {
        debug!(owner = %owner, task_id = %id, "deleting task");
        self.tasks.delete(owner, id).await
    }
}

//! PostgreSQL task repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::task::{
    Page, Task, TaskFilter, TaskId, TaskPriority, TaskRepository, TaskStatus,
};
use crate::domain::DomainError;

/// PostgreSQL implementation of TaskRepository.
///
/// Every statement carries `owner = $n` alongside the id, so a task owned
/// by another account behaves exactly like a missing row.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn status_to_str(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Completed => "completed",
        TaskStatus::Cancelled => "cancelled",
    }
}

fn status_from_str(s: &str) -> Result<TaskStatus, DomainError> {
    match s {
        "pending" => Ok(TaskStatus::Pending),
        "in_progress" => Ok(TaskStatus::InProgress),
        "completed" => Ok(TaskStatus::Completed),
        "cancelled" => Ok(TaskStatus::Cancelled),
        other => Err(DomainError::storage(format!(
            "Unknown task status in storage: {}",
            other
        ))),
    }
}

fn priority_to_str(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "low",
        TaskPriority::Medium => "medium",
        TaskPriority::High => "high",
        TaskPriority::Urgent => "urgent",
    }
}

fn priority_from_str(s: &str) -> Result<TaskPriority, DomainError> {
    match s {
        "low" => Ok(TaskPriority::Low),
        "medium" => Ok(TaskPriority::Medium),
        "high" => Ok(TaskPriority::High),
        "urgent" => Ok(TaskPriority::Urgent),
        other => Err(DomainError::storage(format!(
            "Unknown task priority in storage: {}",
            other
        ))),
    }
}

fn row_to_task(row: &PgRow) -> Result<Task, DomainError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;
    let owner: String = row
        .try_get("owner")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;
    let title: String = row
        .try_get("title")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;
    let priority: String = row
        .try_get("priority")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;
    let due_date: Option<DateTime<Utc>> = row
        .try_get("due_date")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| DomainError::storage(format!("Failed to read task row: {}", e)))?;

    let owner = AccountId::new(owner)
        .map_err(|e| DomainError::storage(format!("Invalid owner in storage: {}", e)))?;

    Ok(Task::from_parts(
        TaskId::from(id),
        owner,
        title,
        description,
        status_from_str(&status)?,
        priority_from_str(&priority)?,
        due_date,
        created_at,
        updated_at,
    ))
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: Task) -> Result<Task, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, owner, title, description, status, priority, due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.id().as_uuid())
        .bind(task.owner().as_str())
        .bind(task.title())
        .bind(task.description())
        .bind(status_to_str(task.status()))
        .bind(priority_to_str(task.priority()))
        .bind(task.due_date())
        .bind(task.created_at())
        .bind(task.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to insert task: {}", e)))?;

        Ok(task)
    }

    async fn get(&self, owner: &AccountId, id: TaskId) -> Result<Option<Task>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner, title, description, status, priority, due_date, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND owner = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get task: {}", e)))?;

        row.as_ref().map(row_to_task).transpose()
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, status = $5, priority = $6, due_date = $7, updated_at = $8
            WHERE id = $1 AND owner = $2
            "#,
        )
        .bind(task.id().as_uuid())
        .bind(task.owner().as_str())
        .bind(task.title())
        .bind(task.description())
        .bind(status_to_str(task.status()))
        .bind(priority_to_str(task.priority()))
        .bind(task.due_date())
        .bind(task.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update task: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Task '{}' not found",
                task.id()
            )));
        }

        Ok(task.clone())
    }

    async fn delete(&self, owner: &AccountId, id: TaskId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner = $2")
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete task: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Task '{}' not found", id)));
        }

        Ok(())
    }

    async fn list(
        &self,
        owner: &AccountId,
        filter: TaskFilter,
        page: Page,
    ) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner, title, description, status, priority, due_date, created_at, updated_at
            FROM tasks
            WHERE owner = $1
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::TEXT IS NULL OR priority = $3)
            ORDER BY created_at ASC, id ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(owner.as_str())
        .bind(filter.status.map(status_to_str))
        .bind(filter.priority.map(priority_to_str))
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list tasks: {}", e)))?;

        rows.iter().map(row_to_task).collect()
    }
}

//! In-memory task repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::task::{Page, Task, TaskFilter, TaskId, TaskRepository};
use crate::domain::DomainError;

/// In-memory implementation of TaskRepository.
///
/// Ownership scoping mirrors the persistent implementations: a lookup only
/// matches when both id and owner do, so another account's task reads as
/// absent.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl InMemoryTaskRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: Task) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id().as_uuid(), task.clone());
        Ok(task)
    }

    async fn get(&self, owner: &AccountId, id: TaskId) -> Result<Option<Task>, DomainError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .get(&id.as_uuid())
            .filter(|t| t.owner() == owner)
            .cloned())
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.write().await;

        match tasks.get(&task.id().as_uuid()) {
            Some(existing) if existing.owner() == task.owner() => {
                tasks.insert(task.id().as_uuid(), task.clone());
                Ok(task.clone())
            }
            _ => Err(DomainError::not_found(format!(
                "Task '{}' not found",
                task.id()
            ))),
        }
    }

    async fn delete(&self, owner: &AccountId, id: TaskId) -> Result<(), DomainError> {
        let mut tasks = self.tasks.write().await;

        match tasks.get(&id.as_uuid()) {
            Some(existing) if existing.owner() == owner => {
                tasks.remove(&id.as_uuid());
                Ok(())
            }
            _ => Err(DomainError::not_found(format!("Task '{}' not found", id))),
        }
    }

    async fn list(
        &self,
        owner: &AccountId,
        filter: TaskFilter,
        page: Page,
    ) -> Result<Vec<Task>, DomainError> {
        let tasks = self.tasks.read().await;

        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|t| t.owner() == owner && filter.matches(t))
            .cloned()
            .collect();

        // Stable order across pages: creation time, id as tiebreak
        matching.sort_by_key(|t| (t.created_at(), t.id().as_uuid()));

        Ok(matching
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect())
    }
}

//! Ownership-scoped task repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Page, Task, TaskFilter, TaskId};
use crate::domain::account::AccountId;
use crate::domain::DomainError;

/// Repository trait for task storage.
///
/// Every access path takes the owner identity as a mandatory predicate;
/// there is intentionally no "get by id alone". A task owned by someone
/// else is indistinguishable from a task that does not exist, so ownership
/// mismatches surface as `NotFound` at this layer already.
#[async_trait]
pub trait TaskRepository: Send + Sync + Debug {
    /// Insert a new task
    async fn insert(&self, task: Task) -> Result<Task, DomainError>;

    /// Get a task by id, scoped to its owner
    async fn get(&self, owner: &AccountId, id: TaskId) -> Result<Option<Task>, DomainError>;

    /// Persist a modified task, matched on id and owner.
    /// Fails with `NotFound` when no such row exists for this owner.
    async fn update(&self, task: &Task) -> Result<Task, DomainError>;

    /// Delete a task, scoped to its owner. Returns `NotFound` when the task
    /// is absent or owned by another account; deletion is not idempotent.
    async fn delete(&self, owner: &AccountId, id: TaskId) -> Result<(), DomainError>;

    /// List the owner's tasks matching the filter, ordered by creation time
    /// ascending with the task id as a stable tiebreak.
    async fn list(
        &self,
        owner: &AccountId,
        filter: TaskFilter,
        page: Page,
    ) -> Result<Vec<Task>, DomainError>;
}

//! Task entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::AccountId;

/// Task identifier, generated server-side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for TaskId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Task entity, always tagged with its owning account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    /// Owning account - immutable after creation
    owner: AccountId,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new pending task for an owner
    pub fn new(owner: AccountId, title: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: TaskId::generate(),
            owner,
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct a task from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TaskId,
        owner: AccountId,
        title: String,
        description: Option<String>,
        status: TaskStatus,
        priority: TaskPriority,
        due_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            title,
            description,
            status,
            priority,
            due_date,
            created_at,
            updated_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    // Getters

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// A task is overdue when its due date has passed and it is not completed
    pub fn is_overdue(&self) -> bool {
        match self.due_date {
            Some(due) if self.status != TaskStatus::Completed => Utc::now() > due,
            _ => false,
        }
    }

    // Mutators

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.touch();
    }

    pub fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
        self.touch();
    }

    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Filters applied to task listings
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Check whether a task matches this filter
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|s| task.status() == s)
            && self.priority.is_none_or(|p| task.priority() == p)
    }
}

/// Limit/offset pagination for task listings
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 50;
    pub const MAX_LIMIT: usize = 200;

    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: limit.min(Self::MAX_LIMIT),
            offset,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn owner() -> AccountId {
        AccountId::new("alice").unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(owner(), "buy milk");

        assert_eq!(task.title(), "buy milk");
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.priority(), TaskPriority::Medium);
        assert!(task.description().is_none());
        assert!(task.due_date().is_none());
    }

    #[test]
    fn test_task_ids_are_unique() {
        let a = Task::new(owner(), "a");
        let b = Task::new(owner(), "b");

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_is_overdue() {
        let past = Utc::now() - Duration::days(1);
        let future = Utc::now() + Duration::days(1);

        let overdue = Task::new(owner(), "late").with_due_date(past);
        assert!(overdue.is_overdue());

        let upcoming = Task::new(owner(), "soon").with_due_date(future);
        assert!(!upcoming.is_overdue());

        let mut done = Task::new(owner(), "done").with_due_date(past);
        done.set_status(TaskStatus::Completed);
        assert!(!done.is_overdue());

        assert!(!Task::new(owner(), "no due date").is_overdue());
    }

    #[test]
    fn test_mutators_touch_updated_at() {
        let mut task = Task::new(owner(), "task");
        let before = task.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));
        task.set_status(TaskStatus::InProgress);

        assert!(task.updated_at() > before);
    }

    #[test]
    fn test_filter_matches() {
        let mut task = Task::new(owner(), "task").with_priority(TaskPriority::High);
        task.set_status(TaskStatus::InProgress);

        assert!(TaskFilter::default().matches(&task));
        assert!(TaskFilter {
            status: Some(TaskStatus::InProgress),
            priority: Some(TaskPriority::High),
        }
        .matches(&task));
        assert!(!TaskFilter {
            status: Some(TaskStatus::Completed),
            priority: None,
        }
        .matches(&task));
    }

    #[test]
    fn test_page_clamps_limit() {
        let page = Page::new(10_000, 0);
        assert_eq!(page.limit, Page::MAX_LIMIT);
    }

    #[test]
    fn test_serialization_includes_owner() {
        let task = Task::new(owner(), "buy milk");
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["owner"], "alice");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["priority"], "medium");
    }
}

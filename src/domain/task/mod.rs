//! Task domain - ownership-scoped task records

mod entity;
mod repository;
mod validation;

pub use entity::{Page, Task, TaskFilter, TaskId, TaskPriority, TaskStatus};
pub use repository::TaskRepository;
pub use validation::{validate_description, validate_title, TaskValidationError};

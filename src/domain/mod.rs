//! Domain layer - entities, repository traits and the error taxonomy

pub mod account;
pub mod error;
pub mod session;
pub mod task;

pub use account::{Account, AccountId};
pub use error::DomainError;
pub use session::RefreshSession;
pub use task::{Task, TaskId, TaskPriority, TaskStatus};

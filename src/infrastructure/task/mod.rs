//! Task storage implementations and service

mod in_memory;
mod postgres;
mod service;

pub use in_memory::InMemoryTaskRepository;
pub use postgres::PostgresTaskRepository;
pub use service::{CreateTaskRequest, TaskPatch, TaskService};

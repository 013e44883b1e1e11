//! Refresh-session registry implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemorySessionRepository;
pub use postgres::PostgresSessionRepository;

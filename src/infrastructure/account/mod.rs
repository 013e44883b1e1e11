//! Account storage implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemoryAccountRepository;
pub use postgres::PostgresAccountRepository;

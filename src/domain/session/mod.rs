//! Session domain - refresh-token registry

mod entity;
mod repository;

pub use entity::RefreshSession;
pub use repository::SessionRepository;

//! Account domain - identities and credential hashes

mod entity;
mod repository;
mod validation;

pub use entity::{Account, AccountId};
pub use repository::AccountRepository;
pub use validation::{validate_account_id, validate_password, AccountValidationError};

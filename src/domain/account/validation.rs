//! Validation rules for account identities and passwords

use thiserror::Error;

const ID_MIN_LEN: usize = 3;
const ID_MAX_LEN: usize = 50;
const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 128;

/// Validation errors for account fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountValidationError {
    #[error("identity must be between {ID_MIN_LEN} and {ID_MAX_LEN} characters")]
    IdentityLength,

    #[error("identity may only contain alphanumeric characters, '.', '_' and '-'")]
    IdentityCharset,

    #[error("identity must start and end with an alphanumeric character")]
    IdentityBoundary,

    #[error("password must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters")]
    PasswordLength,
}

/// Validate an account identity
pub fn validate_account_id(id: &str) -> Result<(), AccountValidationError> {
    if id.len() < ID_MIN_LEN || id.len() > ID_MAX_LEN {
        return Err(AccountValidationError::IdentityLength);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(AccountValidationError::IdentityCharset);
    }

    let first = id.chars().next().unwrap_or('-');
    let last = id.chars().last().unwrap_or('-');

    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(AccountValidationError::IdentityBoundary);
    }

    Ok(())
}

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<(), AccountValidationError> {
    if password.len() < PASSWORD_MIN_LEN || password.len() > PASSWORD_MAX_LEN {
        return Err(AccountValidationError::PasswordLength);
    }

    Ok(())
}

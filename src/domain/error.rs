use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Identity already taken: {identity}")]
    IdentityTaken { identity: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Refresh token reused")]
    TokenReused,

    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn identity_taken(identity: impl Into<String>) -> Self {
        Self::IdentityTaken {
            identity: identity.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Task 'test-id' not found");
        assert_eq!(error.to_string(), "Not found: Task 'test-id' not found");
    }

    #[test]
    fn test_identity_taken_error() {
        let error = DomainError::identity_taken("alice");
        assert_eq!(error.to_string(), "Identity already taken: alice");
    }

    #[test]
    fn test_token_errors_carry_no_detail() {
        assert_eq!(DomainError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(DomainError::TokenExpired.to_string(), "Token expired");
        assert_eq!(
            DomainError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }
}

//! Validation rules for task fields

use thiserror::Error;

const TITLE_MAX_LEN: usize = 255;
const DESCRIPTION_MAX_LEN: usize = 4000;

/// Validation errors for task fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("title must not be empty")]
    TitleEmpty,

    #[error("title must be at most {TITLE_MAX_LEN} characters")]
    TitleTooLong,

    #[error("description must be at most {DESCRIPTION_MAX_LEN} characters")]
    DescriptionTooLong,
}

/// Validate a task title
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::TitleEmpty);
    }

    if title.len() > TITLE_MAX_LEN {
        return Err(TaskValidationError::TitleTooLong);
    }

    Ok(())
}

/// Validate a task description
pub fn validate_description(description: &str) -> Result<(), TaskValidationError> {
    if description.len() > DESCRIPTION_MAX_LEN {
        return Err(TaskValidationError::DescriptionTooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_rules() {
        assert!(validate_title("buy milk").is_ok());
        assert_eq!(validate_title(""), Err(TaskValidationError::TitleEmpty));
        assert_eq!(validate_title("   "), Err(TaskValidationError::TitleEmpty));
        assert_eq!(
            validate_title(&"t".repeat(256)),
            Err(TaskValidationError::TitleTooLong)
        );
    }

    #[test]
    fn test_description_rules() {
        assert!(validate_description("details").is_ok());
        assert_eq!(
            validate_description(&"d".repeat(4001)),
            Err(TaskValidationError::DescriptionTooLong)
        );
    }
}

//! Error types.
//!
//! A run either completes (possibly leaving slots unfilled, which is not
//! an error) or aborts before anything is written.

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Errors that abort a rostering run.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("invalid input ({} problem(s)): {}", .0.len(), summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),

    #[error("data access failed: {0}")]
    Store(#[from] StoreError),
}

/// Maximum number of validation messages rendered in the error text.
const MAX_LISTED_ERRORS: usize = 5;

fn summarize(errors: &[ValidationError]) -> String {
    let mut text = errors
        .iter()
        .take(MAX_LISTED_ERRORS)
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    if errors.len() > MAX_LISTED_ERRORS {
        text.push_str(&format!("; and {} more", errors.len() - MAX_LISTED_ERRORS));
    }
    text
}

impl RosterError {
    /// Validation errors carried by an `InvalidInput` error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            RosterError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message_is_truncated() {
        let errors: Vec<ValidationError> = (0..7)
            .map(|i| ValidationError::new(ValidationErrorKind::UnknownSkill, format!("e{i}")))
            .collect();
        let err = RosterError::InvalidInput(errors);
        let text = err.to_string();
        assert!(text.starts_with("invalid input (7 problem(s)): e0; e1"));
        assert!(text.ends_with("and 2 more"));
        assert_eq!(err.validation_errors().len(), 7);
    }

    #[test]
    fn test_store_error_converts() {
        let err: RosterError = StoreError::Unavailable("roster sheet".into()).into();
        assert!(err.to_string().contains("roster sheet"));
        assert!(err.validation_errors().is_empty());
    }
}

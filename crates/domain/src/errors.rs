//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates out of range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// A navigation session is missing a required selection
    #[error("No {0} selected")]
    MissingSelection(&'static str),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_converts() {
        let err: DomainError = InvalidCoordinates.into();
        assert!(err.to_string().contains("latitude must be -90 to 90"));
    }

    #[test]
    fn missing_selection_message() {
        let err = DomainError::MissingSelection("destination");
        assert_eq!(err.to_string(), "No destination selected");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("destination has no coordinate".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: destination has no coordinate"
        );
    }
}

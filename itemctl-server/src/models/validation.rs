//! Validation error types

use std::fmt;

/// Wire-record validation error, raised before any store work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent
    Missing { field: &'static str },

    /// Field present with the wrong JSON type
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    /// Field has the right shape but an unacceptable value
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    /// Request body is valid JSON but not an object
    NotAnObject,
}

impl ValidationError {
    /// The offending field, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field }
            | Self::InvalidType { field, .. }
            | Self::InvalidValue { field, .. } => Some(field),
            Self::NotAnObject => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::InvalidType { field, expected } => {
                write!(f, "{} must be a {}", field, expected)
            }
            Self::InvalidValue { field, reason } => write!(f, "{}: {}", field, reason),
            Self::NotAnObject => f.write_str("request body must be a JSON object"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Missing { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidType {
            field: "description",
            expected: "string",
        };
        assert_eq!(err.to_string(), "description must be a string");
    }

    #[test]
    fn field_is_reported() {
        let err = ValidationError::InvalidValue {
            field: "skip",
            reason: "must be a non-negative integer",
        };
        assert_eq!(err.field(), Some("skip"));
        assert_eq!(ValidationError::NotAnObject.field(), None);
    }
}

use std::fmt;

/// Caller-supplied data was missing a required field or had an invalid value.
///
/// Raised before any state is mutated, so a failing operation leaves the
/// store exactly as it was. Carries the offending field name and a short
/// human-readable reason, which the surrounding layer can map to a 400
/// response body.
///
/// # Example
///
/// ```
/// use jot_kit::ValidationError;
///
/// let err = ValidationError::missing("text");
/// assert_eq!(err.field(), "text");
/// assert_eq!(err.to_string(), "text is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    /// A required field was absent.
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: String::from("is required"),
        }
    }

    /// A field was present but its value was rejected.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The field the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The reason the field was rejected.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

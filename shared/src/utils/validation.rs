//! Field-level validation helpers

use serde::Serialize;
use std::collections::BTreeMap;

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.add(ValidationError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// First message recorded for `field`
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// One display string per field, in field order
    pub fn to_field_messages(&self) -> BTreeMap<String, String> {
        let mut field_errors: BTreeMap<String, String> = BTreeMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_insert_with(|| error.message.clone());
        }
        field_errors
    }
}

/// Common validation functions
pub mod validators {
    /// Check if a string is not blank
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length (in characters) is at least `min`
    pub fn min_chars(value: &str, min: usize) -> bool {
        value.chars().count() >= min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_messages_keep_first_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add_error("email", "Email is required", "required");
        errors.add_error("email", "Invalid email format", "format");
        errors.add_error("password", "At least 8 characters", "rules");

        let messages = errors.to_field_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages["email"], "Email is required");
        assert_eq!(errors.message_for("password"), Some("At least 8 characters"));
        assert_eq!(errors.message_for("name"), None);
    }

    #[test]
    fn test_validators() {
        assert!(validators::not_empty(" a "));
        assert!(!validators::not_empty("   "));
        assert!(validators::min_chars("ééééé", 5));
        assert!(!validators::min_chars("abc", 4));
    }
}

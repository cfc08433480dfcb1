//! Configuration validation error types.
//!
//! Invalid configuration is a construction-time failure, never a runtime
//! one: builders validate eagerly and surface one of these errors before a
//! client ever exists.
//!
//! # Example
//!
//! ```rust
//! use digikala_core::error::{ConfigValidationError, ValidationResult};
//!
//! fn validate_backoff(value: f64) -> Result<ValidationResult, ConfigValidationError> {
//!     if value < 1.0 {
//!         return Err(ConfigValidationError::too_low("retry_backoff", value, 1.0));
//!     }
//!     Ok(ValidationResult::new())
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Configuration validation error types.
///
/// Each variant names the offending field and the values involved, so a
/// misconfigured client fails with a message that points at the exact knob.
///
/// # Example
///
/// ```rust
/// use digikala_core::error::ConfigValidationError;
///
/// let err = ConfigValidationError::too_low("timeout", 0, "1ms");
/// assert!(err.to_string().contains("timeout"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigValidationError {
    /// Field value exceeds the maximum allowed value.
    #[error("Field '{field}' value {value} exceeds maximum {max}")]
    ValueTooHigh {
        /// The name of the configuration field.
        field: &'static str,
        /// The actual value that was provided.
        value: String,
        /// The maximum allowed value.
        max: String,
    },

    /// Field value is below the minimum allowed value.
    #[error("Field '{field}' value {value} is below minimum {min}")]
    ValueTooLow {
        /// The name of the configuration field.
        field: &'static str,
        /// The actual value that was provided.
        value: String,
        /// The minimum allowed value.
        min: String,
    },

    /// Field value is invalid for reasons other than range.
    #[error("Field '{field}' has invalid value: {reason}")]
    ValueInvalid {
        /// The name of the configuration field.
        field: &'static str,
        /// The reason why the value is invalid.
        reason: String,
    },

    /// Required field is missing.
    #[error("Required field '{field}' is missing")]
    ValueMissing {
        /// The name of the missing configuration field.
        field: &'static str,
    },
}

impl ConfigValidationError {
    /// Returns the field name associated with this error.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            ConfigValidationError::ValueTooHigh { field, .. }
            | ConfigValidationError::ValueTooLow { field, .. }
            | ConfigValidationError::ValueInvalid { field, .. }
            | ConfigValidationError::ValueMissing { field } => field,
        }
    }

    /// Creates a new `ValueTooHigh` error.
    pub fn too_high<V: fmt::Display, M: fmt::Display>(
        field: &'static str,
        value: V,
        max: M,
    ) -> Self {
        ConfigValidationError::ValueTooHigh {
            field,
            value: value.to_string(),
            max: max.to_string(),
        }
    }

    /// Creates a new `ValueTooLow` error.
    pub fn too_low<V: fmt::Display, M: fmt::Display>(
        field: &'static str,
        value: V,
        min: M,
    ) -> Self {
        ConfigValidationError::ValueTooLow {
            field,
            value: value.to_string(),
            min: min.to_string(),
        }
    }

    /// Creates a new `ValueInvalid` error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigValidationError::ValueInvalid {
            field,
            reason: reason.into(),
        }
    }

    /// Creates a new `ValueMissing` error.
    pub fn missing(field: &'static str) -> Self {
        ConfigValidationError::ValueMissing { field }
    }
}

/// Result of a successful configuration validation.
///
/// Contains non-fatal warnings: the configuration is usable, but a value
/// may cause suboptimal behavior (for instance a keepalive pool larger
/// than typical server limits).
///
/// # Example
///
/// ```rust
/// use digikala_core::error::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// result.add_warning("rate_limit_requests is very high for a public key");
/// assert!(result.has_warnings());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Warnings generated during validation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a new empty validation result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Creates a validation result with the given warnings.
    #[must_use]
    pub fn with_warnings(warnings: Vec<String>) -> Self {
        Self { warnings }
    }

    /// Adds a warning to the validation result.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns `true` if there are no warnings.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Returns `true` if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Merges another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_high_display() {
        let err = ConfigValidationError::too_high("max_keepalive_connections", 150, 100);
        let msg = err.to_string();
        assert!(msg.contains("max_keepalive_connections"));
        assert!(msg.contains("150"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_too_low_display() {
        let err = ConfigValidationError::too_low("retry_backoff", 0.5, 1.0);
        let msg = err.to_string();
        assert!(msg.contains("retry_backoff"));
        assert!(msg.contains("0.5"));
    }

    #[test]
    fn test_invalid_display() {
        let err = ConfigValidationError::invalid("base_url", "must start with http:// or https://");
        let msg = err.to_string();
        assert!(msg.contains("base_url"));
        assert!(msg.contains("must start with"));
    }

    #[test]
    fn test_missing_display() {
        let err = ConfigValidationError::missing("base_url");
        let msg = err.to_string();
        assert!(msg.contains("base_url"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_field_name() {
        assert_eq!(
            ConfigValidationError::too_high("a", 2, 1).field_name(),
            "a"
        );
        assert_eq!(ConfigValidationError::too_low("b", 1, 2).field_name(), "b");
        assert_eq!(
            ConfigValidationError::invalid("c", "reason").field_name(),
            "c"
        );
        assert_eq!(ConfigValidationError::missing("d").field_name(), "d");
    }

    #[test]
    fn test_validation_result_warnings() {
        let mut result = ValidationResult::new();
        assert!(result.is_ok());

        result.add_warning("first");
        let mut other = ValidationResult::with_warnings(vec!["second".to_string()]);
        other.merge(result);
        assert_eq!(other.warnings.len(), 2);
        assert!(other.has_warnings());
    }
}

//! Pre-flight request validation.
//!
//! Every request passes through a [`RequestValidator`] before any network
//! resource is spent. The default implementation rejects malformed endpoint
//! paths, oversized parameters, and common injection payloads.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

lazy_static! {
    /// Regex pattern for detecting injection attempts in keys and values.
    /// Matches:
    /// - Path traversal sequences (`../`)
    /// - Protocol separators (`://`)
    /// - Script tag openers and `javascript:` scheme prefixes
    /// - Embedded null bytes
    static ref SUSPICIOUS_PATTERN: Regex =
        Regex::new(r"(?i)\.\./|://|<script|javascript:|\x00")
            .expect("Invalid suspicious pattern regex");
}

/// Maximum allowed length for a parameter key.
pub const MAX_PARAM_KEY_LENGTH: usize = 512;

/// Maximum allowed length for a string parameter value (200KB).
pub const MAX_PARAM_VALUE_LENGTH: usize = 200_000;

/// Validation strategy applied to every outgoing request.
///
/// Implementations must be pure: no side effects, no I/O. Different
/// strategies (strict, permissive, custom) can be injected at pipeline
/// construction.
pub trait RequestValidator: Send + Sync + fmt::Debug {
    /// Validates an endpoint path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the endpoint is empty, does not start
    /// with `/`, or contains a traversal sequence, double slash, or null byte.
    fn validate_endpoint(&self, endpoint: &str) -> Result<()>;

    /// Validates a parameter tree of arbitrary nesting depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any key or string value exceeds the
    /// length limits or matches a suspicious pattern.
    fn validate_params(&self, params: &Map<String, Value>) -> Result<()>;
}

/// Default request validation with security checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl RequestValidator for DefaultValidator {
    fn validate_endpoint(&self, endpoint: &str) -> Result<()> {
        if endpoint.is_empty() {
            return Err(Error::validation("Endpoint cannot be empty"));
        }
        if !endpoint.starts_with('/') {
            return Err(Error::validation(format!(
                "Endpoint must start with '/': {endpoint}"
            )));
        }
        for pattern in ["../", "//", "\x00"] {
            if endpoint.contains(pattern) {
                return Err(Error::validation(format!(
                    "Suspicious pattern in endpoint: {}",
                    pattern.escape_default()
                )));
            }
        }
        Ok(())
    }

    fn validate_params(&self, params: &Map<String, Value>) -> Result<()> {
        for (key, value) in params {
            check_value(key, value, "")?;
        }
        Ok(())
    }
}

/// Recursively validates one key/value pair, tracking the dotted path for
/// diagnostics (list items appear as `[index]` segments).
fn check_value(key: &str, value: &Value, path: &str) -> Result<()> {
    let current_path = if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    };

    if key.len() > MAX_PARAM_KEY_LENGTH {
        let preview: String = key.chars().take(50).collect();
        return Err(Error::validation(format!(
            "Parameter key '{preview}...' exceeds maximum length ({MAX_PARAM_KEY_LENGTH} characters)"
        )));
    }
    if SUSPICIOUS_PATTERN.is_match(key) {
        return Err(Error::validation(format!(
            "Suspicious pattern detected in parameter key '{current_path}'"
        )));
    }

    match value {
        Value::String(text) => {
            if text.len() > MAX_PARAM_VALUE_LENGTH {
                return Err(Error::validation(format!(
                    "Parameter value for '{current_path}' exceeds maximum length \
                     ({MAX_PARAM_VALUE_LENGTH} characters)"
                )));
            }
            if let Some(found) = SUSPICIOUS_PATTERN.find(text) {
                return Err(Error::validation(format!(
                    "Suspicious pattern detected in parameter '{current_path}': {}",
                    found.as_str().escape_default()
                )));
            }
        }
        Value::Object(map) => {
            for (nested_key, nested_value) in map {
                check_value(nested_key, nested_value, &current_path)?;
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                check_value(&format!("[{index}]"), item, &current_path)?;
            }
        }
        // Numbers, booleans and nulls cannot carry payloads.
        _ => {}
    }

    Ok(())
}

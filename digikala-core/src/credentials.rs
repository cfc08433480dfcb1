//! Secure credential types with automatic memory zeroization.
//!
//! API keys and bearer tokens are automatically cleared from memory when
//! dropped, preventing credential leakage through memory dumps or core files.
//!
//! # Security
//!
//! This module provides types that implement the `Zeroize` and `ZeroizeOnDrop`
//! traits from the `zeroize` crate. When these types go out of scope, their
//! memory is securely overwritten with zeros before being deallocated.
//!
//! # Example
//!
//! ```rust
//! use digikala_core::credentials::SecretString;
//!
//! let api_key = SecretString::new("my-api-key");
//!
//! // Access the secret when needed
//! let key_value = api_key.expose_secret();
//!
//! // Debug output is redacted
//! println!("{:?}", api_key); // Prints: [REDACTED]
//!
//! // When api_key goes out of scope, memory is automatically zeroed
//! ```

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure string that is automatically zeroed when dropped.
///
/// Use this for API keys, bearer tokens, and other sensitive data.
/// The underlying memory is securely cleared when the value is dropped,
/// preventing credential leakage through memory inspection.
///
/// # Security Features
///
/// - Memory is zeroed on drop using the `zeroize` crate
/// - Debug and Display implementations are redacted to prevent accidental logging
/// - Cloning copies the secret; every copy is zeroed independently on drop
///
/// # Example
///
/// ```rust
/// use digikala_core::credentials::SecretString;
///
/// let secret = SecretString::new("my-secret-key");
///
/// // Use expose_secret() to access the value
/// assert_eq!(secret.expose_secret(), "my-secret-key");
///
/// // Debug output is safe
/// println!("{:?}", secret); // Prints: [REDACTED]
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new secret string.
    ///
    /// # Arguments
    ///
    /// * `value` - The secret value to store
    ///
    /// # Example
    ///
    /// ```rust
    /// use digikala_core::credentials::SecretString;
    ///
    /// let secret = SecretString::new("api-key-12345");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    ///
    /// # Security
    ///
    /// Avoid storing the returned reference longer than necessary.
    /// The reference should be used immediately and not persisted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use digikala_core::credentials::SecretString;
    ///
    /// let secret = SecretString::new("my-key");
    /// let value = secret.expose_secret();
    /// // Use value immediately, don't store it
    /// ```
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns the length of the secret string.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the secret string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Prevent accidental logging of sensitive data
impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

// Convenient conversions
impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An API credential and the request header it maps to.
///
/// Exactly one credential kind is attached to a client. When both an API key
/// and a bearer token are supplied during configuration, the bearer token
/// takes precedence (see [`ClientConfigBuilder`](crate::config::ClientConfigBuilder)).
///
/// # Example
///
/// ```rust
/// use digikala_core::credentials::Credential;
///
/// let cred = Credential::bearer("eyJhbGciOi...");
/// assert_eq!(cred.header_name(), "Authorization");
/// assert!(cred.header_value().starts_with("Bearer "));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    /// Pre-shared key, sent as `X-API-Key: <key>`.
    ApiKey(SecretString),
    /// OAuth-style bearer token, sent as `Authorization: Bearer <token>`.
    Bearer(SecretString),
}

impl Credential {
    /// Creates an API-key credential.
    pub fn api_key(key: impl Into<SecretString>) -> Self {
        Self::ApiKey(key.into())
    }

    /// Creates a bearer-token credential.
    pub fn bearer(token: impl Into<SecretString>) -> Self {
        Self::Bearer(token.into())
    }

    /// The request header this credential is transmitted under.
    pub fn header_name(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "X-API-Key",
            Self::Bearer(_) => "Authorization",
        }
    }

    /// The header value, including the `Bearer ` prefix for tokens.
    ///
    /// # Security
    ///
    /// The returned string contains the raw secret. Hand it to the transport
    /// and drop it; never log it.
    pub fn header_value(&self) -> String {
        match self {
            Self::ApiKey(key) => key.expose_secret().to_string(),
            Self::Bearer(token) => format!("Bearer {}", token.expose_secret()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_debug_redacted() {
        let secret = SecretString::new("my-api-key");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
    }

    #[test]
    fn test_secret_string_display_redacted() {
        let secret = SecretString::new("my-api-key");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_secret_string_expose() {
        let secret = SecretString::new("my-api-key");
        assert_eq!(secret.expose_secret(), "my-api-key");
    }

    #[test]
    fn test_secret_string_len() {
        let secret = SecretString::new("12345");
        assert_eq!(secret.len(), 5);
        assert!(!secret.is_empty());
    }

    #[test]
    fn test_secret_string_empty() {
        let secret = SecretString::new("");
        assert!(secret.is_empty());
    }

    #[test]
    fn test_secret_from_string() {
        let secret: SecretString = String::from("test").into();
        assert_eq!(secret.expose_secret(), "test");
    }

    #[test]
    fn test_secret_from_str() {
        let secret: SecretString = "test".into();
        assert_eq!(secret.expose_secret(), "test");
    }

    #[test]
    fn test_secret_clone() {
        let secret1 = SecretString::new("test");
        let secret2 = secret1.clone();
        assert_eq!(secret1.expose_secret(), secret2.expose_secret());
    }

    #[test]
    fn test_api_key_header() {
        let cred = Credential::api_key("k-123");
        assert_eq!(cred.header_name(), "X-API-Key");
        assert_eq!(cred.header_value(), "k-123");
    }

    #[test]
    fn test_bearer_header() {
        let cred = Credential::bearer("t-456");
        assert_eq!(cred.header_name(), "Authorization");
        assert_eq!(cred.header_value(), "Bearer t-456");
    }

    #[test]
    fn test_credential_debug_redacted() {
        let cred = Credential::bearer("t-456");
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("t-456"));
        assert!(debug.contains("[REDACTED]"));
    }
}

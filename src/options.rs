//! Transport configuration for the analysis service.

use std::collections::HashMap;
use std::time::Duration;

/// A secret string type for sensitive data like API tokens.
/// Prevents accidental logging or display of secrets.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Generic transport options: truly generic fields plus transport-specific
/// configuration.
///
/// # Type Parameters
/// - `T`: Transport-specific options type
///
/// # Example
/// ```rust
/// use mailsift::options::{TransportOptions, HttpTransport};
/// use std::time::Duration;
///
/// let options = TransportOptions {
///     timeout: Some(Duration::from_secs(30)),
///     provider: HttpTransport {
///         token: None,
///         base_url: Some("http://localhost:5000".to_string()),
///         proxy: None,
///         extra_headers: None,
///     },
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransportOptions<T> {
    /// Whole-request timeout. The streaming path deliberately leaves this
    /// unset by default: an open feed has no natural upper bound, and a
    /// caller who wants one applies it externally through cancellation.
    pub timeout: Option<Duration>,

    /// Transport-specific options
    pub provider: T,
}

/// HTTP-specific transport options.
/// Used as the provider field in `TransportOptions<HttpTransport>`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    /// Bearer token for authenticated deployments
    pub token: Option<SecretString>,

    /// Base URL of the analysis service (e.g., "http://localhost:5000")
    pub base_url: Option<String>,

    /// Optional proxy URL
    pub proxy: Option<String>,

    /// Extra headers to attach to every request
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpTransport {
    /// Create HTTP transport options pointed at a service base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: Some(base_url),
            ..Default::default()
        }
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }
}

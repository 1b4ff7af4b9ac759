//! Client configuration options.

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "the-one-api.dev";

/// Configuration for The One API client.
///
/// # Example
///
/// ```
/// use theoneapi_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_credentials("frodo@shire.me", "precious")
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
///
/// assert_eq!(config.base_url(), "https://the-one-api.dev");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// API host, used to derive the base URL as `https://{host}`
    pub host: String,
    /// Explicit base URL, overriding the one derived from `host`
    pub base_url: Option<String>,
    /// Login email
    pub username: Option<String>,
    /// Login password
    pub password: Option<SecretString>,
    /// Whether to verify TLS certificates
    pub verify_tls: bool,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            base_url: None,
            username: None,
            password: None,
            verify_tls: true,
            timeout: Duration::from_secs(30),
            user_agent: format!("theoneapi-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Use an explicit base URL (scheme included) instead of `https://{host}`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the login credentials used when connecting.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Enable or disable TLS certificate verification.
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The effective base URL, without a trailing slash.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.host),
        }
    }

    /// Returns `true` if both username and password are set and non-empty.
    pub fn has_credentials(&self) -> bool {
        use secrecy::ExposeSecret;

        let username = self.username.as_deref().is_some_and(|u| !u.is_empty());
        let password = self
            .password
            .as_ref()
            .is_some_and(|p| !p.expose_secret().is_empty());
        username && password
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("verify_tls", &self.verify_tls)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "the-one-api.dev");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.verify_tls);
        assert!(!config.has_credentials());
        assert!(config.user_agent.starts_with("theoneapi-rs/"));
    }

    #[test]
    fn test_base_url_derivation() {
        let config = ClientConfig::default().with_host("example.org");
        assert_eq!(config.base_url(), "https://example.org");

        let config = config.with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_partial_credentials() {
        let mut config = ClientConfig::default().with_credentials("user", "");
        assert!(!config.has_credentials());

        config.password = Some(SecretString::from("pass".to_string()));
        assert!(config.has_credentials());

        config.username = None;
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::default().with_credentials("user", "hunter2");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("REDACTED"));
    }
}

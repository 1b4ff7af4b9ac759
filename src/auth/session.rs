//! Bearer-token session and the login exchange.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Result;

/// Path of the login resource.
const LOGIN_PATH: &str = "/auth/login";

/// Bearer-token holder shared by every clone of a client.
///
/// At most one token is active; installing a new one replaces the old
/// one entirely. There is no expiry tracking and no refresh.
///
/// # Thread Safety
///
/// The token sits behind an async `RwLock`, so a client may be shared
/// across tasks and re-authenticated without racing readers.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl Session {
    /// Create a session with no token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session holding the given token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(SecretString::from(token.into())))),
        }
    }

    /// Install a token, replacing any previous one.
    pub async fn set_token(&self, token: SecretString) {
        *self.token.write().await = Some(token);
    }

    /// Remove the current token.
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    /// Returns `true` if a token is installed.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// The value for the `Authorization` header, if a token is installed.
    pub(crate) async fn authorization(&self) -> Option<String> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }

    /// Exchange credentials for an access token.
    ///
    /// A non-success status is a soft failure: it is logged and reported
    /// as [`LoginOutcome::Rejected`], never as an error. Only transport
    /// and decoding failures are returned as `Err`.
    pub(crate) async fn login(
        http: &reqwest::Client,
        base_url: &str,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome> {
        let url = format!("{}{}", base_url, LOGIN_PATH);

        let response = http
            .post(&url)
            .form(&[("email", username), ("password", password.expose_secret())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                base_url,
                "{} response code while trying to get bearer token from {}",
                status.as_u16(),
                base_url
            );
            return Ok(LoginOutcome::Rejected {
                status: status.as_u16(),
            });
        }

        let login: LoginResponse = response.json().await?;
        match login.access_token {
            Some(token) => {
                tracing::info!(base_url, "Session successfully established with {}", base_url);
                Ok(LoginOutcome::Authenticated(SecretString::from(token)))
            }
            None => {
                tracing::warn!(base_url, "Login response from {} carried no access_token", base_url);
                Ok(LoginOutcome::MissingToken)
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// What happened when the client tried to log in.
///
/// Login never fails loudly; inspect this to find out whether the client
/// ended up authenticated.
#[derive(Clone)]
pub enum LoginOutcome {
    /// The server issued a token.
    Authenticated(SecretString),
    /// The server answered with a non-success status.
    Rejected {
        /// HTTP status code
        status: u16,
    },
    /// The server answered with success but no `access_token` field.
    MissingToken,
    /// Username or password was not configured, so no login was attempted.
    MissingCredentials,
}

impl LoginOutcome {
    /// The issued token, if any.
    pub fn token(&self) -> Option<&SecretString> {
        match self {
            LoginOutcome::Authenticated(token) => Some(token),
            _ => None,
        }
    }

    /// Take the issued token, if any.
    pub fn into_token(self) -> Option<SecretString> {
        match self {
            LoginOutcome::Authenticated(token) => Some(token),
            _ => None,
        }
    }

    /// Returns `true` if a token was issued.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, LoginOutcome::Authenticated(_))
    }
}

impl std::fmt::Debug for LoginOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginOutcome::Authenticated(_) => f.write_str("Authenticated([REDACTED])"),
            LoginOutcome::Rejected { status } => {
                f.debug_struct("Rejected").field("status", status).finish()
            }
            LoginOutcome::MissingToken => f.write_str("MissingToken"),
            LoginOutcome::MissingCredentials => f.write_str("MissingCredentials"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::with_token("super-secret-token");
        let debug_str = format!("{:?}", session);

        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[tokio::test]
    async fn test_set_token_replaces_previous() {
        let session = Session::new();
        assert!(!session.is_authenticated().await);
        assert_eq!(session.authorization().await, None);

        session.set_token(SecretString::from("abc".to_string())).await;
        assert_eq!(session.authorization().await.as_deref(), Some("Bearer abc"));

        session.set_token(SecretString::from("xyz".to_string())).await;
        assert_eq!(session.authorization().await.as_deref(), Some("Bearer xyz"));

        session.clear().await;
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_clones_share_token() {
        let session = Session::new();
        let clone = session.clone();
        session.set_token(SecretString::from("shared".to_string())).await;
        assert!(clone.is_authenticated().await);
    }

    #[test]
    fn test_login_outcome_token() {
        let outcome = LoginOutcome::Authenticated(SecretString::from("t".to_string()));
        assert!(outcome.is_authenticated());
        assert_eq!(outcome.token().map(|t| t.expose_secret().to_string()), Some("t".into()));
        assert_eq!(format!("{:?}", outcome), "Authenticated([REDACTED])");

        let rejected = LoginOutcome::Rejected { status: 401 };
        assert!(rejected.token().is_none());
        assert!(rejected.into_token().is_none());
    }
}

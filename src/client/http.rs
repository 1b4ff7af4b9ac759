//! HTTP client implementation for The One API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::SecretString;
use std::sync::Arc;

use crate::api::MoviesService;
use crate::auth::{LoginOutcome, Session};
use crate::models::{Fetched, MovieId, Page, QueryParams};
use crate::{Error, Result};

use super::config::ClientConfig;
use super::paginated::PageStream;

/// The main client for interacting with The One API.
///
/// The client holds the base URL and the bearer token, builds resource
/// URLs, and issues GET requests. Cloning is cheap and clones share the
/// connection pool and the token.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use theoneapi_rs::{TheOneApiClient, ClientConfig, QueryParams};
///
/// # async fn example() -> theoneapi_rs::Result<()> {
/// let client = TheOneApiClient::new(ClientConfig::default())?;
/// client.set_bearer_auth("your-api-token").await;
///
/// // One page
/// let page = client.get_request("/v2/movie", None).await?;
/// println!("{} movies", page.total().unwrap_or_default());
///
/// // Every page, fetched lazily
/// let params = QueryParams::new().limit(2);
/// let mut pages = client.paginated_get_request("/v2/movie", Some(params));
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     println!("page {:?}: {} docs", page.page(), page.docs().len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct TheOneApiClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
    pub(crate) base_url: String,
    pub(crate) login_outcome: Option<LoginOutcome>,
}

impl TheOneApiClient {
    /// Create an unauthenticated client. No request is made.
    ///
    /// Credentials in `config` are ignored here; use
    /// [`connect`](Self::connect) to log in with them, or
    /// [`set_bearer_auth`](Self::set_bearer_auth) to install a token.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http(&config)?;
        let base_url = validated_base_url(&config)?;
        Ok(Self::from_parts(http, config, base_url, Session::new(), None))
    }

    /// Create a client and log in with the configured credentials.
    ///
    /// Logging in is best effort: a missing username or password, or a
    /// rejected login, is logged as a warning and leaves the client
    /// unauthenticated. Check [`login_outcome`](Self::login_outcome) or
    /// [`is_authenticated`](Self::is_authenticated) to find out.
    ///
    /// # Errors
    ///
    /// Returns an error only if the HTTP client cannot be built, the base
    /// URL is invalid, or the login request fails at the transport level.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let http = build_http(&config)?;
        let base_url = validated_base_url(&config)?;
        let session = Session::new();

        let outcome = match (&config.username, &config.password) {
            (Some(username), Some(password)) if config.has_credentials() => {
                Session::login(&http, &base_url, username, password).await?
            }
            _ => {
                tracing::warn!(
                    "Username and/or password not defined, use set_bearer_auth to specify auth token"
                );
                LoginOutcome::MissingCredentials
            }
        };

        if let Some(token) = outcome.token() {
            session.set_token(token.clone()).await;
        }

        Ok(Self::from_parts(http, config, base_url, session, Some(outcome)))
    }

    /// Log in to the default host with username and password.
    ///
    /// This is shorthand for [`connect`](Self::connect) with
    /// [`ClientConfig::with_credentials`].
    pub async fn login(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::connect(ClientConfig::default().with_credentials(username, password)).await
    }

    /// Create a client that already holds a token.
    pub fn with_token(token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let http = build_http(&config)?;
        let base_url = validated_base_url(&config)?;
        Ok(Self::from_parts(
            http,
            config,
            base_url,
            Session::with_token(token),
            None,
        ))
    }

    fn from_parts(
        http: reqwest::Client,
        config: ClientConfig,
        base_url: String,
        session: Session,
        login_outcome: Option<LoginOutcome>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                session,
                config,
                base_url,
                login_outcome,
            }),
        }
    }

    /// Request a bearer token with the configured username and password.
    ///
    /// Returns `None` on any soft failure (missing credentials, rejected
    /// login, no token in the response); the reason is logged.
    pub async fn get_token(&self) -> Result<Option<SecretString>> {
        Ok(self.login_exchange().await?.into_token())
    }

    /// Request a bearer token and report exactly what happened.
    ///
    /// The token is returned, not installed; pass it to
    /// [`set_bearer_auth`](Self::set_bearer_auth) to use it.
    pub async fn login_exchange(&self) -> Result<LoginOutcome> {
        let config = &self.inner.config;
        match (&config.username, &config.password) {
            (Some(username), Some(password)) if config.has_credentials() => {
                Session::login(&self.inner.http, &self.inner.base_url, username, password).await
            }
            _ => {
                tracing::warn!("Username and/or password not defined, cannot request a token");
                Ok(LoginOutcome::MissingCredentials)
            }
        }
    }

    /// Install a bearer token for every later request.
    ///
    /// Any string is accepted. A previous token is replaced, never
    /// combined.
    pub async fn set_bearer_auth(&self, token: impl Into<String>) {
        self.inner
            .session
            .set_token(SecretString::from(token.into()))
            .await;
    }

    /// Remove the bearer token; later requests go out unauthenticated.
    pub async fn clear_bearer_auth(&self) {
        self.inner.session.clear().await;
    }

    /// Returns `true` if a bearer token is installed.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.session.is_authenticated().await
    }

    /// What happened during the login attempted by
    /// [`connect`](Self::connect), or `None` if the client was built
    /// without attempting one.
    pub fn login_outcome(&self) -> Option<&LoginOutcome> {
        self.inner.login_outcome.as_ref()
    }

    /// Build the absolute URL for a resource path.
    ///
    /// The path is given exactly one leading slash, so `"movie"` and
    /// `"/movie"` produce the same URL.
    pub fn build_url(&self, resource: &str) -> String {
        self.inner.build_url(resource)
    }

    /// The base URL every resource path is appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Issue a single GET and return the decoded JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with the status code and body on any
    /// non-success response, and [`Error::Http`] on transport failures.
    pub async fn get_request(&self, resource: &str, params: Option<&QueryParams>) -> Result<Page> {
        self.inner.get_request(resource, params).await
    }

    /// Lazily fetch every page of a list resource.
    ///
    /// The same `params` are sent on every request; the page cursor is
    /// whatever the server reports. See [`PageStream`] for the exact
    /// termination rule.
    pub fn paginated_get_request(&self, resource: &str, params: Option<QueryParams>) -> PageStream {
        PageStream::new(self.inner.clone(), resource, params)
    }

    /// Get the movies service.
    pub fn movies(&self) -> MoviesService {
        MoviesService::new(self.inner.clone())
    }

    /// Get all movies, as one page or as a stream of pages.
    ///
    /// ```no_run
    /// use theoneapi_rs::{Fetched, QueryParams, TheOneApiClient};
    ///
    /// # async fn example(client: TheOneApiClient) -> theoneapi_rs::Result<()> {
    /// let params = QueryParams::new()
    ///     .page(2)
    ///     .limit(10)
    ///     .filter("budgetInMillions>2900", "");
    ///
    /// if let Fetched::Page(page) = client.get_movies(false, Some(params)).await? {
    ///     println!("{:?}", page.docs());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_movies(&self, paginated: bool, params: Option<QueryParams>) -> Result<Fetched> {
        self.movies().fetch_list(paginated, params).await
    }

    /// Get one movie, as one page or as a stream of pages.
    pub async fn get_movie(
        &self,
        movie_id: impl Into<MovieId>,
        paginated: bool,
        params: Option<QueryParams>,
    ) -> Result<Fetched> {
        self.movies().fetch_one(&movie_id.into(), paginated, params).await
    }

    /// Get the quotes of one movie, as one page or as a stream of pages.
    pub async fn get_movie_quotes(
        &self,
        movie_id: impl Into<MovieId>,
        paginated: bool,
        params: Option<QueryParams>,
    ) -> Result<Fetched> {
        self.movies()
            .fetch_quotes(&movie_id.into(), paginated, params)
            .await
    }
}

fn build_http(config: &ClientConfig) -> Result<reqwest::Client> {
    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .danger_accept_invalid_certs(!config.verify_tls)
        .build()?;
    Ok(http)
}

fn validated_base_url(config: &ClientConfig) -> Result<String> {
    let base_url = config.base_url();
    let parsed = url::Url::parse(&base_url)?;
    if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
        return Err(Error::Config(format!("Invalid base URL: {}", base_url)));
    }
    Ok(base_url)
}

impl ClientInner {
    /// Join a resource path onto the base URL with exactly one slash.
    pub(crate) fn build_url(&self, resource: &str) -> String {
        if resource.starts_with('/') {
            format!("{}{}", self.base_url, resource)
        } else {
            format!("{}/{}", self.base_url, resource)
        }
    }

    /// Build request headers, with authentication if a token is set.
    pub(crate) async fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if let Some(authorization) = self.session.authorization().await {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&authorization)
                    .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?,
            );
        }

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Make a GET request with optional query parameters.
    pub(crate) async fn get_request(
        &self,
        resource: &str,
        params: Option<&QueryParams>,
    ) -> Result<Page> {
        let url = self.build_url(resource);
        let headers = self.build_headers().await?;

        tracing::debug!(method = "GET", %url, "Sending request");

        let mut request = self.http.get(&url).headers(headers);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Handle an API response.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Page> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            let body: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
                Error::InvalidResponse(format!("response body is not valid JSON: {}", e))
            })?;
            Page::try_from(body)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(Error::from_api_response(status.as_u16(), &text))
        }
    }
}

impl Clone for TheOneApiClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TheOneApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TheOneApiClient")
            .field("base_url", &self.inner.base_url)
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TheOneApiClient {
        TheOneApiClient::new(ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_build_url_leading_slash() {
        let client = client();
        assert_eq!(client.build_url("movie"), client.build_url("/movie"));
        assert_eq!(client.build_url("/v2/movie"), "https://the-one-api.dev/v2/movie");
    }

    #[test]
    fn test_build_url_custom_host() {
        let client = TheOneApiClient::new(ClientConfig::default().with_host("example.org")).unwrap();
        assert_eq!(client.build_url("v2/movie"), "https://example.org/v2/movie");
        assert_eq!(client.build_url(""), "https://example.org/");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = TheOneApiClient::new(ClientConfig::default().with_base_url("not a url"));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_client_error());
    }

    #[tokio::test]
    async fn test_new_client_is_unauthenticated() {
        let client = client();
        assert!(!client.is_authenticated().await);
        assert!(client.login_outcome().is_none());
    }

    #[tokio::test]
    async fn test_headers_carry_bearer_token() {
        let client = client();
        let headers = client.inner.build_headers().await.unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());

        client.set_bearer_auth("abc").await;
        let headers = client.inner.build_headers().await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");

        client.set_bearer_auth("xyz").await;
        let headers = client.inner.build_headers().await.unwrap();
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer xyz");
    }

    #[tokio::test]
    async fn test_invalid_token_rejected_at_request_time() {
        let client = client();
        client.set_bearer_auth("bad\ntoken").await;
        let err = client.inner.build_headers().await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_get_token_without_credentials() {
        let client = client();
        assert!(client.get_token().await.unwrap().is_none());
        assert!(matches!(
            client.login_exchange().await.unwrap(),
            LoginOutcome::MissingCredentials
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TheOneApiClient::with_token("secret-token", ClientConfig::default()).unwrap();
        assert!(!format!("{:?}", client).contains("secret-token"));
    }
}

//! Authentication for The One API.
//!
//! The API uses a single bearer token. It can be obtained by logging in
//! with an email and password, or installed directly when the caller
//! already has one (the usual case: tokens are issued from the account
//! page on the-one-api.dev).
//!
//! Logging in is best effort. A rejected login does not return an error;
//! it yields a [`LoginOutcome`] and a warning in the log, and leaves the
//! client unauthenticated.
//!
//! ```no_run
//! use theoneapi_rs::{ClientConfig, TheOneApiClient};
//!
//! # async fn example() -> theoneapi_rs::Result<()> {
//! let client = TheOneApiClient::connect(
//!     ClientConfig::default().with_credentials("frodo@shire.me", "precious"),
//! ).await?;
//!
//! if !client.is_authenticated().await {
//!     client.set_bearer_auth("token-from-the-account-page").await;
//! }
//! # Ok(())
//! # }
//! ```

mod session;

pub use session::{LoginOutcome, Session};

//! HTTP client for The One API.
//!
//! This module provides the main entry point [`TheOneApiClient`]: URL
//! building, bearer authentication, single GET requests, and the lazy
//! [`PageStream`] for paginated ones.
//!
//! # Example
//!
//! ```no_run
//! use theoneapi_rs::{TheOneApiClient, ClientConfig};
//!
//! # async fn example() -> theoneapi_rs::Result<()> {
//! let client = TheOneApiClient::with_token("your-api-token", ClientConfig::default())?;
//!
//! let movies = client.get_request("/v2/movie", None).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;

pub use config::{ClientConfig, DEFAULT_HOST};
pub use http::TheOneApiClient;
pub use paginated::{PageStream, PAGE_COUNT_SENTINEL};
pub(crate) use http::ClientInner;

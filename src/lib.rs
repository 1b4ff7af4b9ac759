//! # theoneapi-rs
//!
//! An async Rust client for [The One API](https://the-one-api.dev), the
//! Lord of the Rings REST API.
//!
//! The client authenticates, builds resource URLs, issues GET requests
//! and walks paginated list responses. Responses are handed back as the
//! JSON objects the server sent, with typed views available on request.
//!
//! ## Features
//!
//! - **Authentication**: best-effort email/password login, or a bearer token
//! - **Single requests**: one GET, decoded into a [`Page`]
//! - **Pagination**: a lazy [`PageStream`] that follows the server's page cursor
//! - **Movies**: the movie list, single movies, and movie quotes
//! - **Async-first**: built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use theoneapi_rs::{ClientConfig, Fetched, QueryParams, TheOneApiClient};
//!
//! #[tokio::main]
//! async fn main() -> theoneapi_rs::Result<()> {
//!     let client = TheOneApiClient::with_token("your-api-token", ClientConfig::default())?;
//!
//!     // One page of movies with a budget above 200 million
//!     let params = QueryParams::new().limit(5).filter("budgetInMillions>200", "");
//!     let page = client.get_movies(false, Some(params)).await?.into_page()?;
//!     println!("{} matching movies", page.total().unwrap_or_default());
//!
//!     // Every quote from The Return of the King, page by page
//!     let params = QueryParams::new().limit(100);
//!     if let Fetched::Pages(mut pages) = client
//!         .get_movie_quotes("5cd95395de30eff6ebccde5d", true, Some(params))
//!         .await?
//!     {
//!         while let Some(page) = pages.next().await {
//!             let page = page?;
//!             println!("page {:?}: {} quotes", page.page(), page.docs().len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Requests fail with [`Error::Api`] on any non-success status, carrying the
//! status code and body. Logging in never fails that way: a rejected login
//! is logged as a warning and reported through
//! [`TheOneApiClient::login_outcome`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{Fetched, Movie, MovieId, Page, QueryParams, Quote};
pub use client::{ClientConfig, PageStream, TheOneApiClient};
pub use auth::{LoginOutcome, Session};

/// Prelude module for convenient imports.
///
/// ```rust
/// use theoneapi_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{Fetched, Movie, MovieId, Page, QueryParams, Quote};
    pub use crate::client::{ClientConfig, PageStream, TheOneApiClient};
    pub use crate::auth::{LoginOutcome, Session};
}

//! Data models for The One API.
//!
//! - [`primitives`] - Identifier newtypes such as `MovieId`
//! - [`page`] - Response pages, query parameters, and `Fetched`
//! - [`movie`] - Typed movie and quote documents

pub mod primitives;
pub mod page;
pub mod movie;

// Re-export commonly used types
pub use primitives::*;
pub use page::*;
pub use movie::*;

//! API service modules for The One API endpoints.
//!
//! Each service groups the operations on one resource family.

mod movies;

pub use movies::MoviesService;

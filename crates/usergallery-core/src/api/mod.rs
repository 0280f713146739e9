//! REST API client module for the randomuser.me record source.
//!
//! This module provides the `ApiClient` that performs the single start-up
//! fetch of generated user records. There is no authentication, paging or
//! retry: a request either yields the whole batch or fails.

pub mod client;
pub mod error;

pub use client::{ApiClient, FetchRequest};
pub use error::ApiError;

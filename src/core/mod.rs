//! Core retrieval logic.
//!
//! This module contains:
//! - Pagination: cursor-following retrieval of paged collections

pub mod pagination;

// Re-export commonly used types
pub use pagination::{fetch_all, Page, PageLimits, PageSource, MAX_RESULTS_PER_PAGE};

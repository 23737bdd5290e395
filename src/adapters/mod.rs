//! Adapters for external systems.
//!
//! Each adapter turns an upstream API into [`PageSource`](crate::core::PageSource)s
//! the pagination loop can drive.

pub mod youtube;

// Re-export the YouTube adapter
pub use youtube::{PlaylistItemPages, PlaylistPages, YouTubeApi};

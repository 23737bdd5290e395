//! Domain types for the channel catalog.
//!
//! - PlaylistSummary: a playlist owned by the channel
//! - PlaylistItem: one video entry within a playlist

pub mod playlist;

// Re-export commonly used types
pub use playlist::{sort_by_position, PlaylistItem, PlaylistSummary};

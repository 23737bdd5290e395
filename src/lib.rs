//! channel-catalog - YouTube channel playlist and video catalog
//!
//! Lists every playlist of one configured channel and every video of a
//! playlist through the YouTube Data API, following continuation cursors
//! until each collection is exhausted.
//!
//! # Architecture
//!
//! - Retrieval is a strictly sequential cursor loop; page N+1 needs the
//!   cursor from page N
//! - Results are fully materialized: callers get the whole list or an error
//! - Upstream bodies are parsed into typed records at the boundary
//!
//! # Modules
//!
//! - `adapters`: External system integrations (YouTube Data API)
//! - `core`: Pagination loop
//! - `domain`: Data structures (PlaylistSummary, PlaylistItem)
//! - `catalog`: Channel catalog client and snapshots
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! export YOUTUBE_API_KEY=... YOUTUBE_CHANNEL_ID=UC...
//!
//! channel-catalog playlists
//! channel-catalog items PLxxxxxxxx --json
//! channel-catalog export --output catalog.json
//! ```

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;

// Re-export main types at crate root for convenience
pub use catalog::{ChannelCatalogClient, ChannelSnapshot, PlaylistWithItems};
pub use config::CatalogConfig;
pub use crate::core::{Page, PageLimits, PageSource};
pub use domain::{PlaylistItem, PlaylistSummary};
pub use error::CatalogError;

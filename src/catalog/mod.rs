//! Channel catalog: playlists and their videos.
//!
//! ```text
//! ChannelCatalogClient ─┬─ list_playlists()        ─► playlists.list      (paged)
//!                       └─ list_playlist_items(id) ─► playlistItems.list  (paged)
//! ChannelSnapshot::fetch ─► both of the above for every playlist
//! ```

pub mod client;
pub mod snapshot;

pub use client::ChannelCatalogClient;
pub use snapshot::{ChannelSnapshot, PlaylistWithItems};

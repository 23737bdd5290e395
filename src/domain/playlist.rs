//! Playlist and playlist item records.
//!
//! Both are read-only snapshots built per request from upstream data.
//! Nothing here is persisted or mutated after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playlist owned by the configured channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Upstream playlist identifier
    pub id: String,

    /// Display title (may be empty)
    pub title: String,

    /// Display description (may be empty)
    pub description: String,

    /// Number of items in the playlist at fetch time
    pub item_count: u32,
}

/// One video entry within a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Upstream playlist item identifier (unique within its playlist)
    pub id: String,

    /// Owning playlist (lookup only)
    pub playlist_id: String,

    /// Zero-based display position as reported by upstream
    pub position: u32,

    /// Referenced video
    pub video_id: String,

    pub title: String,

    pub description: String,

    /// Publication time of the entry, if upstream reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Best available thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl PlaylistItem {
    /// Link to the video in the context of its playlist
    pub fn watch_url(&self) -> String {
        format!(
            "https://www.youtube.com/watch?v={}&list={}",
            self.video_id, self.playlist_id
        )
    }
}

/// Order items for display.
///
/// Stable, so entries sharing a position keep their upstream order.
pub fn sort_by_position(items: &mut [PlaylistItem]) {
    items.sort_by_key(|item| item.position);
}

//! Wire types for the YouTube Data API v3 list endpoints.
//!
//! Only the fields we map are declared. Required fields are required here
//! too, so a body that lacks them fails to deserialize and surfaces as
//! [`CatalogError::MalformedResponse`](crate::error::CatalogError).
//! Display text may be absent or `null`; both map to an empty string.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{PlaylistItem, PlaylistSummary};

/// Envelope shared by every `*.list` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl<T> ListResponse<T> {
    /// Cursor for the next page. Upstream never sends an empty token for a
    /// real page, so one is treated as the end of the collection.
    pub fn next_cursor(&self) -> Option<String> {
        self.next_page_token
            .as_ref()
            .filter(|token| !token.is_empty())
            .cloned()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlaylist {
    pub id: String,
    pub snippet: PlaylistSnippet,
    pub content_details: PlaylistContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    pub item_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct RawPlaylistItem {
    pub id: String,
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub position: u32,
    pub resource_id: ResourceId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(default)]
    pub standard: Option<Thumbnail>,
    #[serde(default)]
    pub maxres: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl Thumbnails {
    /// Highest resolution variant available: maxres, standard, high, medium, default
    pub fn best_url(&self) -> Option<&str> {
        [
            &self.maxres,
            &self.standard,
            &self.high,
            &self.medium,
            &self.default,
        ]
        .into_iter()
        .find_map(|t| t.as_ref().map(|t| t.url.as_str()))
    }
}

impl From<RawPlaylist> for PlaylistSummary {
    fn from(raw: RawPlaylist) -> Self {
        Self {
            id: raw.id,
            title: raw.snippet.title.unwrap_or_default(),
            description: raw.snippet.description.unwrap_or_default(),
            item_count: raw.content_details.item_count,
        }
    }
}

impl RawPlaylistItem {
    /// Map into a domain item belonging to the requested playlist
    pub fn into_item(self, playlist_id: &str) -> PlaylistItem {
        let thumbnail_url = self.snippet.thumbnails.best_url().map(str::to_string);
        let snippet = self.snippet;

        PlaylistItem {
            id: self.id,
            playlist_id: playlist_id.to_string(),
            position: snippet.position,
            video_id: snippet.resource_id.video_id,
            title: snippet.title.unwrap_or_default(),
            description: snippet.description.unwrap_or_default(),
            published_at: snippet.published_at,
            thumbnail_url,
        }
    }
}

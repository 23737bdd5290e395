//! YouTube Data API v3 adapter.
//!
//! [`YouTubeApi`] issues single `*.list` requests. [`PlaylistPages`] and
//! [`PlaylistItemPages`] wrap it as [`PageSource`]s so the pagination
//! loop can drive them.

pub mod schema;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::core::pagination::{Page, PageSource, MAX_RESULTS_PER_PAGE};
use crate::domain::{PlaylistItem, PlaylistSummary};
use crate::error::{CatalogError, Result};

use schema::{ListResponse, RawPlaylist, RawPlaylistItem};

/// Resource path for channel playlists
pub const RESOURCE_PLAYLISTS: &str = "playlists";

/// Resource path for playlist entries
pub const RESOURCE_PLAYLIST_ITEMS: &str = "playlistItems";

/// Low-level client for YouTube Data API list endpoints
#[derive(Clone)]
pub struct YouTubeApi {
    /// Base URL without trailing slash
    base_url: String,
    /// API key sent as the `key` query parameter
    api_key: String,
    /// HTTP client
    client: Client,
}

impl YouTubeApi {
    /// Build from a validated configuration
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("channel-catalog/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    /// Build API URL
    fn api_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// Fetch one page of `resource`.
    ///
    /// `params` are the resource-specific filters; `maxResults`, `key` and
    /// `pageToken` are added here.
    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        params: &[(&str, &str)],
        cursor: Option<&str>,
    ) -> Result<ListResponse<T>> {
        let max_results = MAX_RESULTS_PER_PAGE.to_string();

        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("maxResults", &max_results));
        query.push(("key", &self.api_key));
        if let Some(token) = cursor {
            query.push(("pageToken", token));
        }

        debug!(resource, has_cursor = cursor.is_some(), "Requesting page");

        let response = self
            .client
            .get(self.api_url(resource))
            .query(&query)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            warn!(resource, status = status.as_u16(), "Page request failed");
            return Err(CatalogError::FetchFailure {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|source| CatalogError::MalformedResponse { resource, source })
    }
}

/// Request URLs carry the API key, so they are stripped from transport errors
fn transport(e: reqwest::Error) -> CatalogError {
    CatalogError::Transport(e.without_url())
}

/// Pages of a channel's playlists
pub struct PlaylistPages<'a> {
    api: &'a YouTubeApi,
    channel_id: &'a str,
}

impl<'a> PlaylistPages<'a> {
    pub fn new(api: &'a YouTubeApi, channel_id: &'a str) -> Self {
        Self { api, channel_id }
    }
}

#[async_trait]
impl PageSource for PlaylistPages<'_> {
    type Item = PlaylistSummary;

    fn resource(&self) -> &str {
        RESOURCE_PLAYLISTS
    }

    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<PlaylistSummary>> {
        let response: ListResponse<RawPlaylist> = self
            .api
            .list(
                RESOURCE_PLAYLISTS,
                &[
                    ("part", "snippet,contentDetails"),
                    ("channelId", self.channel_id),
                ],
                cursor,
            )
            .await?;

        let next_cursor = response.next_cursor();
        Ok(Page {
            items: response.items.into_iter().map(PlaylistSummary::from).collect(),
            next_cursor,
        })
    }
}

/// Pages of one playlist's entries
pub struct PlaylistItemPages<'a> {
    api: &'a YouTubeApi,
    playlist_id: &'a str,
}

impl<'a> PlaylistItemPages<'a> {
    pub fn new(api: &'a YouTubeApi, playlist_id: &'a str) -> Self {
        Self { api, playlist_id }
    }
}

#[async_trait]
impl PageSource for PlaylistItemPages<'_> {
    type Item = PlaylistItem;

    fn resource(&self) -> &str {
        RESOURCE_PLAYLIST_ITEMS
    }

    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<PlaylistItem>> {
        let response: ListResponse<RawPlaylistItem> = self
            .api
            .list(
                RESOURCE_PLAYLIST_ITEMS,
                &[("part", "snippet"), ("playlistId", self.playlist_id)],
                cursor,
            )
            .await?;

        let next_cursor = response.next_cursor();
        Ok(Page {
            items: response
                .items
                .into_iter()
                .map(|raw| raw.into_item(self.playlist_id))
                .collect(),
            next_cursor,
        })
    }
}

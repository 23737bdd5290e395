//! Channel catalog client.
//!
//! Lists the configured channel's playlists and the entries of any
//! playlist, each fully materialized before returning.

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::adapters::youtube::{PlaylistItemPages, PlaylistPages, YouTubeApi};
use crate::config::CatalogConfig;
use crate::core::pagination::{fetch_all, PageLimits};
use crate::domain::{PlaylistItem, PlaylistSummary};
use crate::error::{CatalogError, Result};

/// Client for one channel's playlists and videos.
///
/// Holds only immutable state, so a single instance can serve concurrent
/// calls from several tasks.
///
/// # Example
///
/// ```ignore
/// use channel_catalog::{CatalogConfig, ChannelCatalogClient};
///
/// let config = CatalogConfig::new(api_key, "UC123");
/// let client = ChannelCatalogClient::new(config)?;
///
/// for playlist in client.list_playlists().await? {
///     println!("{} ({} videos)", playlist.title, playlist.item_count);
/// }
/// ```
pub struct ChannelCatalogClient {
    api: YouTubeApi,
    channel_id: String,
    limits: PageLimits,
}

impl ChannelCatalogClient {
    /// Create a client, validating the configuration first.
    ///
    /// A missing API key or channel id fails here, before any request.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let api = YouTubeApi::new(&config)?;

        Ok(Self {
            api,
            channel_id: config.channel_id,
            limits: config.limits,
        })
    }

    /// Configured channel
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// All playlists of the configured channel, in upstream order
    pub async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        self.list_playlists_with_cancel(&CancellationToken::new())
            .await
    }

    /// [`list_playlists`](Self::list_playlists), abandoned when `cancel` fires
    pub async fn list_playlists_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<PlaylistSummary>> {
        let source = PlaylistPages::new(&self.api, &self.channel_id);
        let playlists = fetch_all(&source, &self.limits, cancel).await?;

        info!(
            channel_id = %self.channel_id,
            count = playlists.len(),
            "Listed playlists"
        );

        Ok(playlists)
    }

    /// All entries of `playlist_id`, in upstream order
    pub async fn list_playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
        self.list_playlist_items_with_cancel(playlist_id, &CancellationToken::new())
            .await
    }

    /// [`list_playlist_items`](Self::list_playlist_items), abandoned when `cancel` fires
    pub async fn list_playlist_items_with_cancel(
        &self,
        playlist_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<PlaylistItem>> {
        if playlist_id.trim().is_empty() {
            return Err(CatalogError::InvalidArgument(
                "playlist id must not be empty".to_string(),
            ));
        }

        let source = PlaylistItemPages::new(&self.api, playlist_id);
        let items = fetch_all(&source, &self.limits, cancel).await?;

        info!(playlist_id, count = items.len(), "Listed playlist items");

        Ok(items)
    }
}

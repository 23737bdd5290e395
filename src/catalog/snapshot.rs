//! Full channel snapshot: every playlist together with its entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::client::ChannelCatalogClient;
use crate::domain::{sort_by_position, PlaylistItem, PlaylistSummary};
use crate::error::Result;

/// A playlist and its entries in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistWithItems {
    #[serde(flatten)]
    pub playlist: PlaylistSummary,

    pub items: Vec<PlaylistItem>,
}

/// Point-in-time copy of a channel's catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    pub channel_id: String,

    /// When retrieval started
    pub fetched_at: DateTime<Utc>,

    pub playlists: Vec<PlaylistWithItems>,
}

impl ChannelSnapshot {
    /// Fetch the playlist list, then each playlist's entries in turn.
    ///
    /// Any failing request fails the whole snapshot.
    pub async fn fetch(
        client: &ChannelCatalogClient,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        let fetched_at = Utc::now();
        let summaries = client.list_playlists_with_cancel(cancel).await?;

        let mut playlists = Vec::with_capacity(summaries.len());
        for playlist in summaries {
            let mut items = client
                .list_playlist_items_with_cancel(&playlist.id, cancel)
                .await?;
            sort_by_position(&mut items);
            playlists.push(PlaylistWithItems { playlist, items });
        }

        info!(
            channel_id = client.channel_id(),
            playlists = playlists.len(),
            "Snapshot complete"
        );

        Ok(Self {
            channel_id: client.channel_id().to_string(),
            fetched_at,
            playlists,
        })
    }

    /// Number of entries across all playlists
    pub fn total_items(&self) -> usize {
        self.playlists.iter().map(|p| p.items.len()).sum()
    }
}

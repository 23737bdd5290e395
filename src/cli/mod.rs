//! Command-line interface for channel-catalog.
//!
//! Lists a channel's playlists, a playlist's videos, or exports the whole
//! catalog as JSON. Failures render a short degraded message instead of
//! a raw error chain.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::catalog::{ChannelCatalogClient, ChannelSnapshot};
use crate::config::{load_config, CatalogConfig};
use crate::domain::{sort_by_position, PlaylistItem, PlaylistSummary};

/// channel-catalog - Browse a YouTube channel's playlists and videos
#[derive(Parser, Debug)]
#[command(name = "channel-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: discover .channel-catalog/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all playlists of the configured channel
    Playlists {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the videos of a playlist
    Items {
        /// Playlist ID
        playlist_id: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export every playlist with its videos as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;

        match self.command {
            Commands::Config => show_config(&config),
            Commands::Playlists { json } => {
                let (client, cancel) = connect(config)?;
                list_playlists(&client, json, &cancel).await
            }
            Commands::Items { playlist_id, json } => {
                let (client, cancel) = connect(config)?;
                list_items(&client, &playlist_id, json, &cancel).await
            }
            Commands::Export { output } => {
                let (client, cancel) = connect(config)?;
                export(&client, output, &cancel).await
            }
        }
    }
}

/// Build the client and a token that Ctrl-C cancels
fn connect(config: CatalogConfig) -> Result<(ChannelCatalogClient, CancellationToken)> {
    let client = ChannelCatalogClient::new(config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    Ok((client, cancel))
}

/// Print the resolved configuration with the API key masked
fn show_config(config: &CatalogConfig) -> Result<()> {
    println!("Configuration:");
    println!(
        "  Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("  API key:     {}", config.masked_api_key());
    println!("  Channel ID:  {}", config.channel_id);
    println!("  Base URL:    {}", config.base_url);
    println!(
        "  Max pages:   {}",
        config
            .limits
            .max_pages
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unbounded".to_string())
    );
    println!("  Timeout:     {}s", config.request_timeout_seconds);

    if let Err(e) = config.validate() {
        println!();
        println!("⚠ {}", e);
    }

    Ok(())
}

async fn list_playlists(
    client: &ChannelCatalogClient,
    json: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let playlists = client
        .list_playlists_with_cancel(cancel)
        .await
        .context("could not load playlists")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&playlists)?);
    } else {
        print!("{}", render_playlists(&playlists));
    }

    Ok(())
}

async fn list_items(
    client: &ChannelCatalogClient,
    playlist_id: &str,
    json: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut items = client
        .list_playlist_items_with_cancel(playlist_id, cancel)
        .await
        .with_context(|| format!("could not load videos of playlist {}", playlist_id))?;
    sort_by_position(&mut items);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", render_items(&items));
    }

    Ok(())
}

async fn export(
    client: &ChannelCatalogClient,
    output: Option<PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let snapshot = ChannelSnapshot::fetch(client, cancel)
        .await
        .context("could not export channel catalog")?;
    let content = serde_json::to_string_pretty(&snapshot)?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, content)
                .await
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            eprintln!(
                "✓ Exported {} playlists ({} videos) to {}",
                snapshot.playlists.len(),
                snapshot.total_items(),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content)?;
        }
    }

    Ok(())
}

/// Table of playlists, one per line
fn render_playlists(playlists: &[PlaylistSummary]) -> String {
    if playlists.is_empty() {
        return "No playlists found.\n".to_string();
    }

    let mut out = format!("{:<36} {:>6}  {}\n", "ID", "VIDEOS", "TITLE");
    out.push_str(&format!("{}\n", "-".repeat(72)));
    for playlist in playlists {
        out.push_str(&format!(
            "{:<36} {:>6}  {}\n",
            playlist.id, playlist.item_count, playlist.title
        ));
    }
    out.push_str(&format!("\n{} playlists\n", playlists.len()));
    out
}

/// Table of playlist entries, one per line
fn render_items(items: &[PlaylistItem]) -> String {
    if items.is_empty() {
        return "Playlist is empty.\n".to_string();
    }

    let mut out = format!("{:>4}  {:<11}  {:<10}  {}\n", "POS", "VIDEO", "PUBLISHED", "TITLE");
    out.push_str(&format!("{}\n", "-".repeat(72)));
    for item in items {
        let published = item
            .published_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>4}  {:<11}  {:<10}  {}\n",
            item.position, item.video_id, published, item.title
        ));
    }
    out.push_str(&format!("\n{} videos\n", items.len()));
    out
}

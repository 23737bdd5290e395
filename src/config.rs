//! Configuration for the catalog client.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (YOUTUBE_API_KEY, YOUTUBE_CHANNEL_ID, YOUTUBE_API_BASE_URL)
//! 2. Config file (.channel-catalog/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - An explicit path wins
//! - Otherwise searches current directory and parents for .channel-catalog/config.yaml
//! - Falls back to ~/.channel-catalog/config.yaml
//!
//! The resolved [`CatalogConfig`] is handed to the client explicitly and
//! validated once there.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::pagination::PageLimits;
use crate::error::CatalogError;

/// Default YouTube Data API endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub const ENV_API_KEY: &str = "YOUTUBE_API_KEY";
pub const ENV_CHANNEL_ID: &str = "YOUTUBE_CHANNEL_ID";
pub const ENV_BASE_URL: &str = "YOUTUBE_API_BASE_URL";

const CONFIG_DIR: &str = ".channel-catalog";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub youtube: YouTubeSection,
    #[serde(default)]
    pub limits: Option<LimitsSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YouTubeSection {
    pub api_key: Option<String>,
    pub channel_id: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsSection {
    /// `null` disables the page bound
    #[serde(default = "default_max_pages_setting")]
    pub max_pages: Option<u32>,
    pub request_timeout_seconds: Option<u64>,
}

fn default_max_pages_setting() -> Option<u32> {
    PageLimits::default().max_pages
}

/// Resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// YouTube Data API key
    pub api_key: String,

    /// Channel whose playlists are listed
    pub channel_id: String,

    /// API base URL
    pub base_url: String,

    /// Pagination bounds
    pub limits: PageLimits,

    /// Per-request timeout
    pub request_timeout_seconds: u64,

    /// Config file the values came from (if any)
    pub config_file: Option<PathBuf>,
}

impl CatalogConfig {
    /// Configuration with defaults for everything but the credentials
    pub fn new(api_key: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            channel_id: channel_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            limits: PageLimits::default(),
            request_timeout_seconds: 30,
            config_file: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Check that everything needed for a request is present
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.api_key.trim().is_empty() {
            return Err(CatalogError::Configuration(format!(
                "API key is not set (set {} or youtube.api_key)",
                ENV_API_KEY
            )));
        }

        if self.channel_id.trim().is_empty() {
            return Err(CatalogError::Configuration(format!(
                "channel id is not set (set {} or youtube.channel_id)",
                ENV_CHANNEL_ID
            )));
        }

        let base = self.base_url.trim();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(CatalogError::Configuration(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }

        if self.request_timeout_seconds == 0 {
            return Err(CatalogError::Configuration(
                "request timeout must be at least one second".to_string(),
            ));
        }

        if self.limits.max_pages == Some(0) {
            return Err(CatalogError::Configuration(
                "max_pages must be at least 1 (use null to disable the bound)".to_string(),
            ));
        }

        Ok(())
    }

    /// API key with all but the last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge file values with environment overrides.
///
/// `env` looks up a variable; blank values count as unset. Missing
/// credentials are left empty here and rejected by [`CatalogConfig::validate`].
pub fn merge(
    file: ConfigFile,
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> CatalogConfig {
    let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    let api_key = lookup(ENV_API_KEY)
        .or(file.youtube.api_key)
        .unwrap_or_default();
    let channel_id = lookup(ENV_CHANNEL_ID)
        .or(file.youtube.channel_id)
        .unwrap_or_default();

    let mut config = CatalogConfig::new(api_key.trim(), channel_id.trim());
    config.config_file = config_file;

    if let Some(base_url) = lookup(ENV_BASE_URL).or(file.youtube.base_url) {
        config.base_url = base_url;
    }

    if let Some(limits) = file.limits {
        config.limits = PageLimits {
            max_pages: limits.max_pages,
        };
        if let Some(timeout) = limits.request_timeout_seconds {
            config.request_timeout_seconds = timeout;
        }
    }

    config
}

/// Load configuration from all sources.
///
/// An explicit `path` must exist; otherwise discovery is attempted and a
/// missing file simply means env vars and defaults only.
pub fn load_config(path: Option<&Path>) -> Result<CatalogConfig> {
    let config_file = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config_file(),
    };

    let file = match config_file {
        Some(ref p) => load_config_file(p)?,
        None => ConfigFile::default(),
    };

    Ok(merge(file, config_file, |name| std::env::var(name).ok()))
}

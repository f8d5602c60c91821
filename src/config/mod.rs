//! Configuration management
//!
//! Values are layered: built-in defaults, then an optional `config.*` file in
//! the config directory, then `PBA_`-prefixed environment variables.
//! The browser build has no filesystem or environment and uses the defaults.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the production REST API
pub const DEFAULT_API_BASE_URL: &str = "https://api.clickplick.co.uk/api";

/// Directory name used under the platform config/data roots
const APP_DIR_NAME: &str = "photobooth-admin";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AdminConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Clear the session when a protected call is rejected with 401
    #[serde(default)]
    pub logout_on_unauthorized: bool,

    #[serde(default)]
    pub upload: UploadConfig,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_page_size() -> usize {
    25
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            page_size: default_page_size(),
            logout_on_unauthorized: false,
            upload: UploadConfig::default(),
        }
    }
}

impl AdminConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Image compression budget applied before any gallery or post upload
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Longest allowed side of the re-encoded image, in pixels
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// Maximum encoded size, in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    #[serde(default = "default_initial_quality")]
    pub initial_quality: u8,
    #[serde(default = "default_min_quality")]
    pub min_quality: u8,
    #[serde(default = "default_quality_step")]
    pub quality_step: u8,
}

fn default_max_dimension() -> u32 {
    1920
}

fn default_max_bytes() -> usize {
    1024 * 1024
}

fn default_initial_quality() -> u8 {
    85
}

fn default_min_quality() -> u8 {
    40
}

fn default_quality_step() -> u8 {
    10
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            max_bytes: default_max_bytes(),
            initial_quality: default_initial_quality(),
            min_quality: default_min_quality(),
            quality_step: default_quality_step(),
        }
    }
}

/// Get config directory (PBA_CONFIG_DIR, XDG_CONFIG_HOME or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PBA_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_DIR_NAME);
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR_NAME);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR_NAME);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR_NAME);
        }
    }

    PathBuf::from(".")
}

/// Get data directory for the persisted session (PBA_DATA_DIR, XDG_DATA_HOME or config dir)
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PBA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join(APP_DIR_NAME);
        }
    }

    get_config_dir()
}

/// Load configuration: defaults < config file < environment
#[cfg(feature = "server")]
pub fn load_config() -> anyhow::Result<AdminConfig> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy())
                .required(false),
        )
        // PBA_REQUEST_TIMEOUT_SECS, PBA_UPLOAD__MAX_BYTES, etc.
        .add_source(
            ::config::Environment::with_prefix("PBA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    // Short alias for the one value deployments always set
    if let Ok(url) = std::env::var("PBA_API_URL") {
        if !url.trim().is_empty() {
            builder = builder.set_override("api_base_url", url.trim().to_string())?;
        }
    }

    let config: AdminConfig = builder.build()?.try_deserialize()?;

    if url::Url::parse(&config.api_base_url).is_err() {
        anyhow::bail!("api_base_url is not a valid URL: {}", config.api_base_url);
    }

    Ok(config)
}

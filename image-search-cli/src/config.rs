// ABOUTME: Configuration file loading, validation, and hierarchical merging for the CLI
// ABOUTME: Supports TOML config files with XDG Base Directory lookup

use anyhow::{anyhow, Context, Result};
use image_search_sdk::constants::{paging, timeouts, urls};
use image_search_sdk::FormParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::constants::config as files;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_prefix: Option<String>,
    #[serde(default)]
    pub pipeline: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths)
    }

    /// Load configuration from specific file paths, later paths overriding earlier ones
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !path.as_ref().exists() {
                continue;
            }
            let file_config = Self::load_from_file(path)?;
            config = config.merge(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(files::APP_DIR)
                    .join(files::FILE_NAME),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(config_home)
                    .join(files::APP_DIR)
                    .join(files::FILE_NAME),
            );
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(files::LOCAL_FILE));
        }

        paths.dedup();
        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            api_url: other.api_url.or(self.api_url),
            api_prefix: other.api_prefix.or(self.api_prefix),
            pipeline: other.pipeline.or(self.pipeline),
            collection: other.collection.or(self.collection),
            image_path: other.image_path.or(self.image_path),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            page_size: other.page_size.or(self.page_size),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref api_url) = self.api_url {
            validate_api_url(api_url)?;
        }
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be positive"));
        }
        if self.page_size == Some(0) {
            return Err(anyhow!("page_size must be positive"));
        }
        Ok(())
    }
}

fn validate_api_url(api_url: &str) -> Result<()> {
    let url = Url::parse(api_url).with_context(|| format!("Invalid api_url '{}'", api_url))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(anyhow!(
            "Invalid api_url '{}': scheme must be http or https, not {}",
            api_url,
            scheme
        )),
    }
}

/// Effective settings after applying command-line flags over the config files.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub api_prefix: String,
    pub timeout: Duration,
    pub params: FormParams,
}

impl Settings {
    pub fn resolve(config: Config, cli: &Cli) -> Result<Self> {
        let overrides = Config {
            api_url: cli.api_url.clone(),
            api_prefix: None,
            pipeline: cli.pipeline.clone(),
            collection: cli.collection.clone(),
            image_path: cli.image_path.clone(),
            timeout_secs: cli.timeout,
            page_size: None,
        };
        let config = config.merge(overrides);
        config.validate()?;

        Ok(Self {
            api_url: config
                .api_url
                .unwrap_or_else(|| urls::DEFAULT_BASE_URL.to_string()),
            api_prefix: config
                .api_prefix
                .unwrap_or_else(|| urls::API_PREFIX.to_string()),
            timeout: config
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(timeouts::HTTP_REQUEST_TIMEOUT),
            params: FormParams::builder()
                .pipeline(config.pipeline.unwrap_or_default())
                .collection(config.collection.unwrap_or_default())
                .image_path(config.image_path.unwrap_or_default())
                .page_size(config.page_size.unwrap_or(paging::DEFAULT_PAGE_SIZE))
                .build(),
        })
    }
}

//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{api, loader};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Base URL of the shop API (scheme, host and port, no trailing slash)
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Send the stored admin token as a bearer credential on admin calls
    pub attach_token: bool,
    /// Override for the storage/log directory
    pub data_dir: Option<PathBuf>,
    /// Interval between simulated loader progress steps
    pub loader_tick: Duration,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Point the client at another server.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Send (or withhold) the stored admin token on admin calls.
    #[must_use]
    pub const fn with_attach_token(mut self, attach: bool) -> Self {
        self.attach_token = attach;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            base_url: api::DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(api::DEFAULT_TIMEOUT_SECS),
            attach_token: false,
            data_dir: None,
            loader_tick: loader::TICK,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = env::var("SHOP_BASE_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::config(
                    format!("SHOP_BASE_URL '{url}' is not an http(s) URL"),
                    "Use a value like http://localhost:3000",
                ));
            }
            config.base_url = url;
        }

        if let Ok(secs) = env::var("SHOP_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.request_timeout = Duration::from_secs(secs.max(1));
            }
        }

        if let Ok(flag) = env::var("SHOP_ATTACH_TOKEN") {
            config.attach_token = parse_flag(&flag);
        }

        config.data_dir = env::var("SHOP_DATA_DIR")
            .ok()
            .map(|path| PathBuf::from(shellexpand::tilde(&path).to_string()));

        if let Ok(ms) = env::var("SHOP_LOADER_TICK_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                config.loader_tick = Duration::from_millis(ms.max(1));
            }
        }

        Ok(config)
    }

    /// Directory holding the persisted storage file and logs.
    ///
    /// Uses the platform data directory (via `dirs::data_dir`) unless
    /// `SHOP_DATA_DIR` overrides it. The directory is created on demand.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| {
                    Error::config(
                        "No platform data directory available",
                        "Set SHOP_DATA_DIR to a writable directory",
                    )
                })?
                .join(env!("CARGO_PKG_NAME")),
        };
        fs_err::create_dir_all(&dir)?;
        Ok(dir)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(!config.attach_token);
        assert_eq!(config.loader_tick, Duration::from_millis(500));
        assert_eq!(config.app_name(), "shopfront");
    }

    #[test]
    fn builders_override_single_settings() {
        let config = Config::default()
            .with_base_url("https://shop.example.com")
            .with_attach_token(true);
        assert_eq!(config.base_url, "https://shop.example.com");
        assert!(config.attach_token);
        assert_eq!(config.app_name(), "shopfront");
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn storage_dir_uses_override_and_creates_it() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(tmp.path().join("nested")),
            ..Config::default()
        };
        let dir = config.storage_dir().unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("nested"));
    }
}

//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the store
//! is opened.
//!
//! ## Required Variables
//!
//! None. Every setting has a default and mirroring is off unless
//! configured.
//!
//! ## Optional Variables
//!
//! - `DATA_FILE` - Path of the JSON data file (default: `urlshortener.json`)
//! - `CODE_LENGTH` - Generated short code length (default: 6)
//! - `MIRROR_ENDPOINT` - Object store base URL; enables mirroring together
//!   with `MIRROR_BUCKET`
//! - `MIRROR_BUCKET` - Bucket/container holding the mirrored data file
//! - `MIRROR_ACCESS_TOKEN` - Bearer token for the object store (optional)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Generated code length used when `CODE_LENGTH` is not set.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the local JSON data file. Its basename doubles as the
    /// remote mirror object name.
    pub data_file: PathBuf,
    /// Length of generated short codes.
    pub code_length: usize,
    /// Object store base URL. Mirroring is enabled when both this and
    /// `mirror_bucket` are set.
    pub mirror_endpoint: Option<String>,
    pub mirror_bucket: Option<String>,
    pub mirror_access_token: Option<String>,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let data_file = env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("urlshortener.json"));

        let code_length = env::var("CODE_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CODE_LENGTH);

        let mirror_endpoint = env::var("MIRROR_ENDPOINT").ok().filter(|v| !v.is_empty());
        let mirror_bucket = env::var("MIRROR_BUCKET").ok().filter(|v| !v.is_empty());
        let mirror_access_token = env::var("MIRROR_ACCESS_TOKEN")
            .ok()
            .filter(|v| !v.is_empty());

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Self {
            data_file,
            code_length,
            mirror_endpoint,
            mirror_bucket,
            mirror_access_token,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `code_length` is 0 or larger than 32
    /// - `log_format` is not `text` or `json`
    /// - `data_file` is empty
    /// - only one of `MIRROR_ENDPOINT` / `MIRROR_BUCKET` is set
    /// - `MIRROR_ENDPOINT` is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 || self.code_length > 32 {
            anyhow::bail!(
                "CODE_LENGTH must be between 1 and 32, got {}",
                self.code_length
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.data_file.as_os_str().is_empty() {
            anyhow::bail!("DATA_FILE must not be empty");
        }

        match (&self.mirror_endpoint, &self.mirror_bucket) {
            (Some(endpoint), Some(_)) => {
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    anyhow::bail!(
                        "MIRROR_ENDPOINT must start with 'http://' or 'https://', got '{}'",
                        endpoint
                    );
                }
            }
            (Some(_), None) => {
                anyhow::bail!("MIRROR_BUCKET must be set when MIRROR_ENDPOINT is set");
            }
            (None, Some(_)) => {
                anyhow::bail!("MIRROR_ENDPOINT must be set when MIRROR_BUCKET is set");
            }
            (None, None) => {}
        }

        Ok(())
    }

    /// Returns whether remote mirroring is enabled.
    pub fn is_mirror_enabled(&self) -> bool {
        self.mirror_endpoint.is_some() && self.mirror_bucket.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Data file: {}", self.data_file.display());
        tracing::info!("  Code length: {}", self.code_length);

        if let (Some(endpoint), Some(bucket)) = (&self.mirror_endpoint, &self.mirror_bucket) {
            tracing::info!(
                "  Mirror: {}/{} (enabled, token {})",
                endpoint,
                bucket,
                if self.mirror_access_token.is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
        } else {
            tracing::info!("  Mirror: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

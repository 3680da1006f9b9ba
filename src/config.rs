//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILPANE_CONFIG` (environment variable)
//! 2. `~/.config/mailpane/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailpane\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::format::SizeUnits;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Webmail server location and transport settings.
    pub server: ServerConfig,
    /// Feature flags normally supplied by the hosting application.
    pub features: FeaturesConfig,
    /// Display settings.
    pub display: DisplayConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// Webmail server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// URL of the page hosting the webmail client. Relative links are
    /// resolved against it.
    pub page_url: String,
    /// Prefix of every server link (`./?` on a stock install).
    pub server_prefix: String,
    /// Account hash inserted into links; `0` when unauthenticated.
    pub account_hash: String,
    /// CSRF token sent with ajax calls, if the server requires one.
    pub token: Option<String>,
    /// Request timeout for ajax calls, in seconds.
    pub timeout_secs: u64,
}

/// Feature flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Allow native PDF previews.
    pub allow_pdf_preview: bool,
    /// An external (framed) preview provider is available.
    pub framed_preview_supported: bool,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Unit system for friendly sizes.
    pub size_units: SizeUnits,
    /// Color theme: "dark" or "light".
    pub theme: String,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            page_url: "http://localhost/".to_string(),
            server_prefix: "./?".to_string(),
            account_hash: "0".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            allow_pdf_preview: true,
            framed_preview_supported: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            size_units: SizeUnits::Binary,
            theme: "dark".to_string(),
        }
    }
}

// ── Load ─────────────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("MAILPANE_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|d| d.join("mailpane").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailpane")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("mailpane.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.server.server_prefix, "./?");
        assert_eq!(cfg.server.account_hash, "0");
        assert!(cfg.features.allow_pdf_preview);
        assert!(!cfg.features.framed_preview_supported);
        assert_eq!(cfg.display.size_units, SizeUnits::Binary);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[features]
framed_preview_supported = true

[display]
size_units = "decimal"
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert!(cfg.features.framed_preview_supported);
        assert!(cfg.features.allow_pdf_preview);
        assert_eq!(cfg.display.size_units, SizeUnits::Decimal);
        assert_eq!(cfg.server.timeout_secs, 30);
    }

    #[test]
    fn test_log_file_path_uses_cache_override() {
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(PathBuf::from("/tmp/mailpane-test"));
        assert_eq!(
            log_file_path(&cfg),
            PathBuf::from("/tmp/mailpane-test/mailpane.log")
        );
    }
}

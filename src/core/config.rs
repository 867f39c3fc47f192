//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.marketnav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::trademe::{DEFAULT_ROWS, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MarketnavConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listings: ListingsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub sandbox: Option<bool>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListingsConfig {
    pub rows: Option<u32>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub rows: u32,
}

/// Settings passed on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub sandbox: bool,
    pub rows: Option<u32>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.marketnav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".marketnav").join("config.toml"))
}

/// Load config from `~/.marketnav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MarketnavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MarketnavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MarketnavConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<MarketnavConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MarketnavConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MarketnavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Secrets stay out of the log
    debug!(
        "Config: base_url={:?} sandbox={:?} key_set={} rows={:?}",
        config.api.base_url,
        config.api.sandbox,
        config.api.consumer_key.is_some(),
        config.listings.rows
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# marketnav configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "https://api.trademe.co.nz/v1"
# sandbox = false                    # true = https://api.tmsandbox.co.nz/v1
# consumer_key = "..."               # Or set TRADEME_CONSUMER_KEY env var
# consumer_secret = "..."            # Or set TRADEME_CONSUMER_SECRET env var

# [listings]
# rows = 50                          # Listings fetched per category
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MarketnavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

/// Same as [`resolve`] with the environment supplied by `env`, so tests don't have to
/// mutate process state.
pub fn resolve_with_env(
    config: &MarketnavConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI url → CLI --sandbox → env → config url → config sandbox → production
    let config_default = if config.api.sandbox.unwrap_or(false) {
        SANDBOX_BASE_URL
    } else {
        PRODUCTION_BASE_URL
    };
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| cli.sandbox.then(|| SANDBOX_BASE_URL.to_string()))
        .or_else(|| env("MARKETNAV_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| config_default.to_string());

    // Credentials: env → config
    let consumer_key = env("TRADEME_CONSUMER_KEY").or_else(|| config.api.consumer_key.clone());
    let consumer_secret =
        env("TRADEME_CONSUMER_SECRET").or_else(|| config.api.consumer_secret.clone());

    // Rows: CLI → env → config → default
    let rows = cli
        .rows
        .or_else(|| {
            env("MARKETNAV_ROWS").and_then(|raw| match raw.parse() {
                Ok(rows) => Some(rows),
                Err(_) => {
                    warn!("Ignoring unparseable MARKETNAV_ROWS={:?}", raw);
                    None
                }
            })
        })
        .or(config.listings.rows)
        .unwrap_or(DEFAULT_ROWS);

    ResolvedConfig {
        base_url,
        consumer_key,
        consumer_secret,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let resolved = resolve_with_env(&MarketnavConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, PRODUCTION_BASE_URL);
        assert_eq!(resolved.rows, DEFAULT_ROWS);
        assert!(resolved.consumer_key.is_none());
        assert!(resolved.consumer_secret.is_none());
    }

    #[test]
    fn test_parse_sparse_toml() {
        let config: MarketnavConfig = toml::from_str("[listings]\nrows = 10\n").unwrap();
        assert_eq!(config.listings.rows, Some(10));
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: MarketnavConfig = toml::from_str("").unwrap();
        assert!(config.api.sandbox.is_none());
        assert!(config.listings.rows.is_none());
    }

    #[test]
    fn test_config_sandbox_flag() {
        let config = MarketnavConfig {
            api: ApiConfig {
                sandbox: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, SANDBOX_BASE_URL);
    }

    #[test]
    fn test_override_order() {
        let config = MarketnavConfig {
            api: ApiConfig {
                base_url: Some("http://from-file".into()),
                consumer_key: Some("file-key".into()),
                consumer_secret: Some("file-secret".into()),
                ..Default::default()
            },
            listings: ListingsConfig { rows: Some(5) },
        };
        let env: HashMap<&str, &str> = HashMap::from([
            ("MARKETNAV_BASE_URL", "http://from-env"),
            ("TRADEME_CONSUMER_KEY", "env-key"),
            ("MARKETNAV_ROWS", "7"),
        ]);
        let lookup = |name: &str| env.get(name).map(|v| v.to_string());

        // Env beats file
        let resolved = resolve_with_env(&config, &CliOverrides::default(), lookup);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.consumer_key.as_deref(), Some("env-key"));
        assert_eq!(resolved.consumer_secret.as_deref(), Some("file-secret"));
        assert_eq!(resolved.rows, 7);

        // CLI beats env
        let cli = CliOverrides {
            base_url: Some("http://from-cli".into()),
            sandbox: false,
            rows: Some(3),
        };
        let resolved = resolve_with_env(&config, &cli, lookup);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.rows, 3);
    }

    #[test]
    fn test_cli_sandbox_beats_env_url() {
        let cli = CliOverrides {
            sandbox: true,
            ..Default::default()
        };
        let resolved = resolve_with_env(&MarketnavConfig::default(), &cli, |name| {
            (name == "MARKETNAV_BASE_URL").then(|| "http://from-env".to_string())
        });
        assert_eq!(resolved.base_url, SANDBOX_BASE_URL);
    }

    #[test]
    fn test_bad_env_rows_falls_through() {
        let config = MarketnavConfig {
            listings: ListingsConfig { rows: Some(12) },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), |name| {
            (name == "MARKETNAV_ROWS").then(|| "lots".to_string())
        });
        assert_eq!(resolved.rows, 12);
    }
}

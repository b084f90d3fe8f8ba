//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lectio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::Language;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LectioConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReaderConfig {
    pub language: Option<Language>,
    pub search_limit: Option<u32>,
}

/// Values supplied on the command line (None = flag not given).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub language: Option<Language>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;
pub const BACKEND_URL_ENV: &str = "LECTIO_BACKEND_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub request_timeout: Duration,
    pub language: Language,
    pub search_limit: u32,
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

/// Returns the path to `~/.lectio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lectio").join("config.toml"))
}

/// Load config from `~/.lectio/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LectioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LectioConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LectioConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LectioConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LectioConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LectioConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Lectio Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:8001"   # Or set LECTIO_BACKEND_URL, or pass --backend-url
# timeout_secs = 15

# [reader]
# language = "english"                 # "english", "hindi", "hebrew", "greek"
# search_limit = 50
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LectioConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var(BACKEND_URL_ENV).ok())
}

fn resolve_with_env(
    config: &LectioConfig,
    cli: &CliOverrides,
    env_backend_url: Option<String>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let backend_url = cli
        .backend_url
        .clone()
        .or(env_backend_url)
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    // Language: CLI → config → default
    let language = cli
        .language
        .or(config.reader.language)
        .unwrap_or_default();

    let search_limit = match config.reader.search_limit {
        Some(0) => {
            warn!("search_limit = 0 is not usable, using {}", DEFAULT_SEARCH_LIMIT);
            DEFAULT_SEARCH_LIMIT
        }
        Some(limit) => limit,
        None => DEFAULT_SEARCH_LIMIT,
    };

    let timeout_secs = match config.api.timeout_secs {
        Some(0) => {
            warn!("timeout_secs = 0 is not usable, using {}", DEFAULT_TIMEOUT_SECS);
            DEFAULT_TIMEOUT_SECS
        }
        Some(secs) => secs,
        None => DEFAULT_TIMEOUT_SECS,
    };

    ResolvedConfig {
        backend_url,
        request_timeout: Duration::from_secs(timeout_secs),
        language,
        search_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = LectioConfig::default();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), None);
        assert_eq!(resolved.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(resolved.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(resolved.language, Language::English);
        assert_eq!(resolved.search_limit, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = LectioConfig {
            api: ApiConfig {
                base_url: Some("http://bible.local".to_string()),
                timeout_secs: Some(3),
            },
            reader: ReaderConfig {
                language: Some(Language::Hebrew),
                search_limit: Some(20),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), None);
        assert_eq!(resolved.backend_url, "http://bible.local");
        assert_eq!(resolved.request_timeout, Duration::from_secs(3));
        assert_eq!(resolved.language, Language::Hebrew);
        assert_eq!(resolved.search_limit, 20);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = LectioConfig {
            api: ApiConfig {
                base_url: Some("http://from-config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let from_env = resolve_with_env(
            &config,
            &CliOverrides::default(),
            Some("http://from-env".to_string()),
        );
        assert_eq!(from_env.backend_url, "http://from-env");

        let cli = CliOverrides {
            backend_url: Some("http://from-cli".to_string()),
            language: Some(Language::Greek),
        };
        let from_cli = resolve_with_env(&config, &cli, Some("http://from-env".to_string()));
        assert_eq!(from_cli.backend_url, "http://from-cli");
        assert_eq!(from_cli.language, Language::Greek);
    }

    #[test]
    fn test_zero_search_limit_falls_back() {
        let config = LectioConfig {
            reader: ReaderConfig {
                search_limit: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), None);
        assert_eq!(resolved.search_limit, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let config = LectioConfig {
            api: ApiConfig {
                timeout_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), None);
        assert_eq!(resolved.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[api]
base_url = "http://192.168.1.100:8001"
timeout_secs = 30

[reader]
language = "hindi"
search_limit = 25
"#;
        let config: LectioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://192.168.1.100:8001"));
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.reader.language, Some(Language::Hindi));
        assert_eq!(config.reader.search_limit, Some(25));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[reader]
language = "greek"
"#;
        let config: LectioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reader.language, Some(Language::Greek));
        assert!(config.api.base_url.is_none());
        assert!(config.reader.search_limit.is_none());
    }

    #[test]
    fn test_unknown_language_is_a_parse_error() {
        let toml_str = r#"
[reader]
language = "latin"
"#;
        assert!(toml::from_str::<LectioConfig>(toml_str).is_err());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("lectio-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.api.base_url.is_none());

        // The generated file is all comments, so it loads back as defaults
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("LECTIO_BACKEND_URL"));
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.reader.language.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = std::env::temp_dir().join(format!("lectio-bad-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let _ = fs::remove_dir_all(&dir);
    }
}

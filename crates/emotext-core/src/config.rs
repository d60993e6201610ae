//! Configuration for the upstream emotion API and the web server.
//!
//! The API key is always injected at runtime: from a flag or environment
//! variable, or from a secret file such as `/run/secrets/EMOTEXT_API_KEY`.
//! An optional TOML file supplies everything except the key itself.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [upstream]
//! api_url = "https://api.apilayer.com/text_to_emotion"
//! api_key_file = "/run/secrets/EMOTEXT_API_KEY"
//! timeout_secs = 30
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{EmotionError, EmotionResult};

/// Default upstream emotion API URL.
pub const DEFAULT_API_URL: &str = "https://api.apilayer.com/text_to_emotion";

/// Default upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default host to bind the web server to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default web server port.
pub const DEFAULT_PORT: u16 = 3030;

/// Secret credential for the upstream API. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank values.
    pub fn new(key: impl Into<String>) -> EmotionResult<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(EmotionError::config("API key is empty"));
        }
        Ok(Self(key))
    }

    /// Read a key from a secret file, trimming surrounding whitespace.
    pub fn from_file(path: &Path) -> EmotionResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EmotionError::config(format!("failed to read API key from {}: {}", path.display(), e))
        })?;
        Self::new(contents)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolved upstream client configuration.
#[derive(Debug, Clone)]
pub struct EmotionConfig {
    pub api_url: String,
    pub api_key: ApiKey,
    pub timeout: Duration,
}

impl EmotionConfig {
    pub fn new(api_url: &str, api_key: ApiKey, timeout: Duration) -> EmotionResult<Self> {
        reqwest::Url::parse(api_url)
            .map_err(|e| EmotionError::config(format!("invalid API URL '{}': {}", api_url, e)))?;

        Ok(Self {
            api_url: api_url.to_string(),
            api_key,
            timeout,
        })
    }

    /// Combine explicit overrides with the config file and defaults.
    ///
    /// Overrides win over the file; a key given directly wins over any key
    /// file.
    pub fn resolve(overrides: &ConfigOverrides, file: &ConfigFile) -> EmotionResult<Self> {
        let api_url = overrides
            .api_url
            .clone()
            .or_else(|| file.upstream.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or(file.upstream.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let key_file = overrides
            .api_key_file
            .as_ref()
            .or(file.upstream.api_key_file.as_ref());

        let api_key = match (&overrides.api_key, key_file) {
            (Some(key), _) => ApiKey::new(key.as_str())?,
            (None, Some(path)) => {
                debug!(path = %path.display(), "Reading API key from file");
                ApiKey::from_file(path)?
            }
            (None, None) => {
                return Err(EmotionError::config(
                    "no API key configured (set EMOTEXT_API_KEY or EMOTEXT_API_KEY_FILE)",
                ))
            }
        };

        info!(api_url = %api_url, timeout_secs, "Upstream emotion API configured");

        Self::new(&api_url, api_key, Duration::from_secs(timeout_secs))
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// On-disk TOML configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub upstream: UpstreamSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamSection {
    pub api_url: Option<String>,
    pub api_key_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> EmotionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> EmotionResult<Self> {
        toml::from_str(contents).map_err(|e| EmotionError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("emotext-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.expose(), "super-secret");
    }

    #[test]
    fn test_api_key_rejects_blank() {
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("  \n").is_err());
    }

    #[test]
    fn test_api_key_from_file_trims() {
        let path = temp_path("key");
        std::fs::write(&path, "abc123\n").unwrap();
        let key = ApiKey::from_file(&path).unwrap();
        assert_eq!(key.expose(), "abc123");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_defaults() {
        let overrides = ConfigOverrides {
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let config = EmotionConfig::resolve(&overrides, &ConfigFile::default()).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_resolve_overrides_win_over_file() {
        let file = ConfigFile::parse(
            r#"
            [upstream]
            api_url = "https://file.example.com/emotion"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        let overrides = ConfigOverrides {
            api_url: Some("https://flag.example.com/emotion".to_string()),
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let config = EmotionConfig::resolve(&overrides, &file).unwrap();
        assert_eq!(config.api_url, "https://flag.example.com/emotion");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_resolve_reads_key_file_from_config() {
        let path = temp_path("config-key");
        std::fs::write(&path, "from-file").unwrap();
        let file = ConfigFile {
            upstream: UpstreamSection {
                api_key_file: Some(path.clone()),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = EmotionConfig::resolve(&ConfigOverrides::default(), &file).unwrap();
        assert_eq!(config.api_key.expose(), "from-file");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_without_key_fails() {
        let err = EmotionConfig::resolve(&ConfigOverrides::default(), &ConfigFile::default())
            .unwrap_err();
        assert!(matches!(err, EmotionError::Config(_)));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let key = ApiKey::new("k").unwrap();
        assert!(EmotionConfig::new("not a url", key, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_config_file_sections() {
        let file = ConfigFile::parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(file.server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(file.server.port, Some(8080));
        assert!(file.upstream.api_url.is_none());
    }

    #[test]
    fn test_config_file_rejects_unknown_keys() {
        assert!(ConfigFile::parse("[upstream]\napi_key = \"inline\"\n").is_err());
    }
}

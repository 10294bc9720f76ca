// Application configuration
//
// Read from the environment, optionally seeded from a `.env` file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::ai::credentials::{ProviderCredentials, CLAUDE_API_URL, OPENAI_API_URL};
use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: ProviderCredentials,
    pub plex_base_url: String,
    pub plex_token: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Load `.env` from the working directory if present, then read the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => debug!(error = %e, "ignoring unreadable .env"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration from a dotenv-format file only, leaving the
    /// process environment untouched
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let vars: Vec<(String, String)> =
            dotenvy::from_path_iter(path)?.collect::<Result<_, _>>()?;

        Self::from_lookup(|name| {
            vars.iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let credentials = ProviderCredentials::new(var("OPENAI_API_KEY"), var("ANTHROPIC_API_KEY"))
            .with_base_urls(
                var("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_API_URL.to_string()),
                var("ANTHROPIC_BASE_URL").unwrap_or_else(|| CLAUDE_API_URL.to_string()),
            );

        let port: u16 = match var("PLEXMUSE_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PLEXMUSE_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs: u64 = match var("PLEXMUSE_HTTP_TIMEOUT_SECS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PLEXMUSE_HTTP_TIMEOUT_SECS",
                value,
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            credentials,
            plex_base_url: required("PLEX_BASE_URL")?,
            plex_token: required("PLEX_TOKEN")?,
            port,
            static_dir: var("PLEXMUSE_STATIC_DIR").map(PathBuf::from),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_env(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_file_with_defaults() {
        let file = write_env(
            "OPENAI_API_KEY=sk-test\nPLEX_BASE_URL=http://plex:32400\nPLEX_TOKEN=test-token\n",
        );
        let config = AppConfig::from_file(file.path()).unwrap();

        assert!(config.credentials.has_openai());
        assert!(!config.credentials.has_anthropic());
        assert_eq!(config.credentials.openai_base_url, OPENAI_API_URL);
        assert_eq!(config.plex_base_url, "http://plex:32400");
        assert_eq!(config.plex_token, "test-token");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_missing_plex_token() {
        let file = write_env("PLEX_BASE_URL=http://plex:32400\n");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PLEX_TOKEN")));
    }

    #[test]
    fn test_invalid_port() {
        let file = write_env(
            "PLEX_BASE_URL=http://plex:32400\nPLEX_TOKEN=t\nPLEXMUSE_PORT=eighty\n",
        );
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PLEXMUSE_PORT", .. }));
    }

    #[test]
    fn test_unreadable_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(&dir.path().join("missing.env")).unwrap_err();
        assert!(matches!(err, ConfigError::DotEnv(ref e) if e.not_found()));
    }

    #[test]
    fn test_malformed_env_file() {
        let file = write_env("PLEX_TOKEN=t\nthis line has no assignment\n");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DotEnv(_)));
    }
}

// Where the console keeps its state: the app registration and the access
// token, both under one per-user directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::api::AppRegistration;

/// Instance used when registering for the first time.
pub const DEFAULT_API_BASE: &str = "https://mastodon.social";

const APP_FILE: &str = "client.txt";
const TOKEN_FILE: &str = "token.txt";

#[derive(Debug, Clone)]
pub struct Config {
    dir: PathBuf,
    api_base_url: String,
}

impl Config {
    /// Configuration from the environment.
    ///
    /// `TOOTSTREAM_CONFIG_DIR` overrides the directory, which otherwise is
    /// `~/.config/tootstream`. `TOOTSTREAM_API_BASE` picks the instance to
    /// register with, falling back to `https://mastodon.social`.
    pub fn from_env() -> Result<Self> {
        let dir = match std::env::var_os("TOOTSTREAM_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("tootstream"),
        };
        let api_base_url =
            std::env::var("TOOTSTREAM_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        debug!(dir = %dir.display(), %api_base_url, "loaded configuration");
        Ok(Config::new(dir, api_base_url))
    }

    pub fn new(dir: impl Into<PathBuf>, api_base_url: impl Into<String>) -> Self {
        Config {
            dir: dir.into(),
            api_base_url: api_base_url.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn app_path(&self) -> PathBuf {
        self.dir.join(APP_FILE)
    }

    pub fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    /// Create the configuration directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))
    }

    /// Load the stored app registration, if any.
    pub fn load_app(&self) -> Result<Option<AppRegistration>> {
        let path = self.app_path();
        if !path.is_file() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let app = serde_json::from_str(&data)
            .with_context(|| format!("Parsing app registration in {}", path.display()))?;
        Ok(Some(app))
    }

    pub fn save_app(&self, app: &AppRegistration) -> Result<()> {
        let path = self.app_path();
        let data = serde_json::to_string_pretty(app)?;
        fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load the stored access token. A missing or blank file means none.
    pub fn load_token(&self) -> Result<Option<String>> {
        let path = self.token_path();
        if !path.is_file() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let token = data.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    pub fn save_token(&self, token: &str) -> Result<()> {
        let path = self.token_path();
        fs::write(&path, token).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_files_live_in_config_dir() {
        let config = Config::new("/tmp/toots", DEFAULT_API_BASE);
        assert_eq!(config.app_path(), PathBuf::from("/tmp/toots/client.txt"));
        assert_eq!(config.token_path(), PathBuf::from("/tmp/toots/token.txt"));
    }

    #[test]
    fn missing_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path(), DEFAULT_API_BASE);
        assert!(config.load_app().unwrap().is_none());
        assert!(config.load_token().unwrap().is_none());
    }

    #[test]
    fn ensure_dir_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("a").join("b"), DEFAULT_API_BASE);
        config.ensure_dir().unwrap();
        assert!(config.dir().is_dir());
    }

    #[test]
    fn token_is_trimmed_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path(), DEFAULT_API_BASE);
        fs::write(config.token_path(), "abc123\n").unwrap();
        assert_eq!(config.load_token().unwrap().as_deref(), Some("abc123"));

        fs::write(config.token_path(), "  \n").unwrap();
        assert!(config.load_token().unwrap().is_none());
    }

    #[test]
    fn app_registration_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path(), DEFAULT_API_BASE);
        let app = AppRegistration {
            client_id: "id".into(),
            client_secret: "secret".into(),
            api_base_url: DEFAULT_API_BASE.into(),
        };
        config.save_app(&app).unwrap();
        assert_eq!(config.load_app().unwrap(), Some(app));
    }
}

//! Configuration file loading and management.
//!
//! Settings live in a YAML file, by default at
//! `<config dir>/chirp/config.yml` (for example
//! `~/.config/chirp/config.yml` on Linux). The path can be overridden with
//! the root `--config` flag or the `CHIRP_CONFIG` environment variable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api;
use crate::error::{ChirpError, Result};

/// Environment variable that overrides the default config file path.
pub const ENV_CONFIG: &str = "CHIRP_CONFIG";

/// Stored configuration for the chirp tool.
///
/// See <https://developer.twitter.com/en/portal/dashboard> for the
/// credential fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Per-user access tokens, selected by the `--auth-user` flag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserToken>,

    // Non-persistent fields.
    #[serde(skip)]
    pub auth_user: Option<String>,
    #[serde(skip)]
    file_path: Option<PathBuf>,
}

/// An access token for an individual user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserToken {
    pub username: String,
    pub token: String,
}

impl Settings {
    /// Reads settings from a YAML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| {
            ChirpError::Config(format!("reading config file {}: {e}", path.display()))
        })?;
        let mut settings: Self = serde_yaml::from_str(&data)
            .map_err(|e| ChirpError::Config(format!("decoding config data: {e}")))?;
        settings.file_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Writes the current state back to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        match &self.file_path {
            Some(path) => self.save_to(path),
            None => Err(ChirpError::Config("unknown file path".into())),
        }
    }

    /// Writes the settings to `path` atomically (temp file plus rename).
    /// On unix the temp file is created owner-readable only, so the
    /// credentials are never visible under wider permissions.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        use std::io::Write as _;

        let data = serde_yaml::to_string(self)?;
        let tmp = path.with_extension("yml.tmp");
        // A stale temp file would keep its old permissions through the
        // truncating open, so clear it first.
        let _ = fs::remove_file(&tmp);
        let mut opts = fs::OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt as _;
            opts.mode(0o600);
        }
        let mut file = opts.open(&tmp)?;
        file.write_all(data.as_bytes())?;
        drop(file);
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Finds the access token for `name`, case-insensitively.
    #[must_use]
    pub fn find_user(&self, name: &str) -> Option<&UserToken> {
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(name))
    }

    /// Builds an API client from the selected credentials: the
    /// `--auth-user` token when one was named, the app bearer token
    /// otherwise.
    pub fn client(&self) -> Result<api::Client> {
        let token = match &self.auth_user {
            Some(user) => self
                .find_user(user)
                .map(|u| u.token.clone())
                .ok_or_else(|| ChirpError::Auth(format!("no access token for user {user:?}")))?,
            None => self
                .bearer_token
                .clone()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ChirpError::Auth("no bearer token is available".into()))?,
        };
        api::Client::new(token)
    }
}

/// The default config file path: `CHIRP_CONFIG` if set, the platform config
/// directory otherwise.
#[must_use]
pub fn default_path() -> PathBuf {
    if let Ok(path) = std::env::var(ENV_CONFIG)
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("chirp.yml"),
        |base| base.config_dir().join("chirp").join("config.yml"),
    )
}

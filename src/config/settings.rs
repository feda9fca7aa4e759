use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use serde::Deserialize;
use tracing::debug;
use crate::config::store::DEFAULT_IDENTITY_DIR;
use crate::error::SshcError;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// ssh config to manage (default `~/.ssh/config`)
    pub ssh_config: Option<String>,
    /// Directory `IdentityFile` names are stored under
    pub identity_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self { ssh_config: None, identity_dir: DEFAULT_IDENTITY_DIR.to_string() }
    }
}

impl Settings {
    /// Reads the settings file; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, SshcError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SshcError::Settings { path: path.to_path_buf(), message: e.to_string() });
            }
        };
        Self::from_toml(&content)
            .map_err(|message| SshcError::Settings { path: path.to_path_buf(), message })
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        let mut settings: Settings = toml::from_str(content).map_err(|e| e.message().to_string())?;
        if !settings.identity_dir.is_empty() && !settings.identity_dir.ends_with('/') {
            settings.identity_dir.push('/');
        }
        Ok(settings)
    }
}

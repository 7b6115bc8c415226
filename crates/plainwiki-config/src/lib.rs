use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PAGES_PATH: &str = "data";
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one `.txt` file per page
    pub pages_path: PathBuf,
    /// Directory with `edit.html`, `view.html` and `list.html`.
    /// When unset the server uses its built-in templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_path: Option<PathBuf>,
    pub listen_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_path: PathBuf::from(DEFAULT_PAGES_PATH),
            templates_path: None,
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config.expanded()))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/plainwiki");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    // Expand shell variables and tilde in every configured path
    fn expanded(mut self) -> Self {
        self.pages_path = Self::expand_path(&self.pages_path).unwrap_or(self.pages_path);
        self.templates_path = self
            .templates_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));
        self
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

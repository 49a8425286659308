use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub list: ListConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Base URL of the REST API; resource paths are appended to it
    #[serde(default = "default_server_url")]
    pub url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FormConfig {
    /// Ranking lists offered by the editor, in display order
    #[serde(default = "default_ranking_lists")]
    pub ranking_lists: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub order_by: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("server.url must start with http:// or https:// (got '{0}')")]
    InvalidServerUrl(String),
    #[error("server.timeout_seconds must be greater than zero")]
    ZeroTimeout,
    #[error("form.ranking_lists contains an empty name")]
    EmptyRankingName,
    #[error("form.ranking_lists contains '{0}' more than once")]
    DuplicateRankingName(String),
    #[error("list.page_size must be greater than zero")]
    ZeroPageSize,
}

fn default_server_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

pub fn default_ranking_lists() -> Vec<String> {
    vec!["AFI 1998".to_string(), "AFI 2007".to_string()]
}

fn default_page_size() -> u32 {
    20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            ranking_lists: default_ranking_lists(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            order_by: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist yet
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidServerUrl(self.server.url.clone()));
        }
        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let mut seen = std::collections::HashSet::new();
        for name in &self.form.ranking_lists {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyRankingName);
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateRankingName(name.clone()));
            }
        }

        if self.list.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        Ok(())
    }
}

pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, ConfigError, FormConfig, ListConfig, ServerConfig, default_ranking_lists};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};

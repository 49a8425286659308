use crate::output::Output;
use color_eyre::Result;
use filmoteka_client::{FilmsService, RecordingNavigator};
use filmoteka_config::{Config, CredentialStore, PathManager};
use std::sync::Arc;

/// What every command talking to the server needs
pub struct Session {
    pub config: Config,
    pub service: Arc<FilmsService>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

pub fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(cred_store)
}

pub fn open_session(output: &Output) -> Result<Session> {
    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    let cred_store = load_credentials(&path_manager)?;

    let navigator = Arc::new(RecordingNavigator::new());
    let service = FilmsService::from_config(&config, &cred_store, Arc::new(*output), navigator.clone())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create HTTP client: {}", e))?;
    tracing::debug!("Using films API at {}", service.base_url());

    Ok(Session {
        config,
        service: Arc::new(service),
        navigator,
    })
}

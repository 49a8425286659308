use crate::error::ClientError;
use crate::films::api;
use crate::films::query::FilmsQuery;
use crate::traits::{FilmStore, Navigator, Notifier};
use async_trait::async_trait;
use filmoteka_config::{Config, CredentialStore};
use filmoteka_models::{Film, FilmsResponse};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// View shown after a film has been saved
pub const FILMS_ROUTE: &str = "/films";

/// HTTP access to the films resource.
///
/// Failures are reported to the notifier before being returned, so callers
/// only need to handle the `Err` when they want to do more than show it.
pub struct FilmsService {
    client: Arc<Client>,
    base_url: String,
    token: Option<String>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl FilmsService {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url: api::normalize_base_url(base_url),
            token: token.filter(|t| !t.trim().is_empty()),
            notifier,
            navigator,
        })
    }

    /// Build the service from the loaded config and the stored token
    pub fn from_config(
        config: &Config,
        credentials: &CredentialStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let token = credentials.get_auth_token().cloned();
        if token.is_none() {
            debug!("No auth token stored, requests are sent anonymously");
        }
        Self::new(
            &config.server.url,
            token,
            Duration::from_secs(config.server.timeout_seconds),
            notifier,
            navigator,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Report a failure to the user and hand it back to the caller
    fn process_error(&self, err: ClientError) -> ClientError {
        debug!("Films API request failed: {}", err);
        self.notifier.error(&err.to_string());
        err
    }

    pub async fn get_film(&self, id: u64) -> Result<Film, ClientError> {
        api::get_film(&self.client, &self.base_url, self.token(), id)
            .await
            .map_err(|e| self.process_error(e))
    }

    /// Save the film, announce it and ask to return to the film list
    pub async fn save_film(&self, film: &Film) -> Result<Film, ClientError> {
        let saved = api::save_film(&self.client, &self.base_url, self.token(), film)
            .await
            .map_err(|e| self.process_error(e))?;

        info!("Saved film {:?} (id={:?})", film.nazov, saved.id);
        self.notifier.success(&format!("Film {} saved", film.nazov));
        self.navigator.navigate_by_url(FILMS_ROUTE);
        Ok(saved)
    }

    pub async fn get_films(&self, query: &FilmsQuery) -> Result<FilmsResponse, ClientError> {
        api::get_films(&self.client, &self.base_url, self.token(), query)
            .await
            .map_err(|e| self.process_error(e))
    }
}

#[async_trait]
impl FilmStore for FilmsService {
    async fn get_film(&self, id: u64) -> Result<Film, ClientError> {
        FilmsService::get_film(self, id).await
    }

    async fn save_film(&self, film: &Film) -> Result<Film, ClientError> {
        FilmsService::save_film(self, film).await
    }

    async fn get_films(&self, query: &FilmsQuery) -> Result<FilmsResponse, ClientError> {
        FilmsService::get_films(self, query).await
    }
}

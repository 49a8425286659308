use async_trait::async_trait;
use filmoteka_models::{Film, FilmsResponse};
use crate::error::ClientError;
use crate::films::FilmsQuery;

/// Where films come from and go to.
///
/// `FilmsService` implements this over HTTP; the editor only depends on the trait.
#[async_trait]
pub trait FilmStore: Send + Sync {
    async fn get_film(&self, id: u64) -> Result<Film, ClientError>;

    /// Persist the whole record (no partial updates) and return what the server stored
    async fn save_film(&self, film: &Film) -> Result<Film, ClientError>;

    async fn get_films(&self, query: &FilmsQuery) -> Result<FilmsResponse, ClientError>;
}

/// Sink for user-facing success and error messages
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Receives requests to move to another view after an operation completes
pub trait Navigator: Send + Sync {
    fn navigate_by_url(&self, url: &str);
}

use filmoteka_client::{ClientError, FilmStore};
use filmoteka_models::Film;
use std::sync::Arc;
use tracing::{debug, info};
use crate::error::EditorError;
use crate::film_form::FilmEditForm;

/// Turn a route parameter into a film id.
///
/// Missing, zero, negative or non-numeric parameters all mean "create a new film".
pub fn route_film_id(param: Option<&str>) -> Option<u64> {
    param
        .and_then(|p| p.trim().parse::<u64>().ok())
        .filter(|id| *id != 0)
}

/// One editing session: the film as loaded plus the form the user edits
pub struct FilmEditor {
    store: Arc<dyn FilmStore>,
    film_id: Option<u64>,
    film: Film,
    form: FilmEditForm,
}

impl FilmEditor {
    pub fn new(store: Arc<dyn FilmStore>, ranking_lists: &[String]) -> Self {
        Self::with_form(store, FilmEditForm::new(ranking_lists))
    }

    pub fn with_form(store: Arc<dyn FilmStore>, form: FilmEditForm) -> Self {
        Self {
            store,
            film_id: None,
            film: Film::empty(),
            form,
        }
    }

    /// Load the film named by the route parameter (or start a blank one) into the form
    pub async fn open(&mut self, route_param: Option<&str>) -> Result<(), ClientError> {
        let film_id = route_film_id(route_param);
        let film = match film_id {
            Some(id) => {
                debug!("Opening film {} for editing", id);
                self.store.get_film(id).await?
            }
            None => {
                debug!("Opening blank film");
                Film::empty()
            }
        };

        self.film_id = film_id;
        self.form.populate(&film);
        self.film = film;
        Ok(())
    }

    pub fn film_id(&self) -> Option<u64> {
        self.film_id
    }

    /// The record as loaded; form edits are applied to it on submit
    pub fn film(&self) -> &Film {
        &self.film
    }

    pub fn form(&self) -> &FilmEditForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FilmEditForm {
        &mut self.form
    }

    /// Validate, apply the form to the loaded film and save it.
    ///
    /// Nothing is sent when the form is invalid.
    pub async fn submit(&mut self) -> Result<Film, EditorError> {
        let film = self.form.submit(&self.film)?;
        let saved = self.store.save_film(&film).await?;

        info!("Film {:?} saved with id {:?}", saved.nazov, saved.id);
        self.film_id = saved.id;
        self.film = saved.clone();
        self.form.mark_pristine();
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use async_trait::async_trait;
    use filmoteka_client::FilmsQuery;
    use filmoteka_models::{FilmsResponse, Person};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        films: Mutex<Vec<Film>>,
        saved: Mutex<Vec<Film>>,
        fail_saves: bool,
    }

    impl MemoryStore {
        fn with_film(film: Film) -> Self {
            Self {
                films: Mutex::new(vec![film]),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl FilmStore for MemoryStore {
        async fn get_film(&self, id: u64) -> Result<Film, ClientError> {
            self.films
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.id == Some(id))
                .cloned()
                .ok_or_else(|| ClientError::NotFound(format!("films/{}", id)))
        }

        async fn save_film(&self, film: &Film) -> Result<Film, ClientError> {
            if self.fail_saves {
                return Err(ClientError::Server { status: 500, message: "down".to_string() });
            }
            self.saved.lock().unwrap().push(film.clone());
            let mut stored = film.clone();
            stored.id.get_or_insert(100);
            Ok(stored)
        }

        async fn get_films(&self, _query: &FilmsQuery) -> Result<FilmsResponse, ClientError> {
            let items = self.films.lock().unwrap().clone();
            Ok(FilmsResponse { total_count: items.len() as u64, items })
        }
    }

    fn lists() -> Vec<String> {
        vec!["AFI 1998".to_string(), "AFI 2007".to_string()]
    }

    fn metropolis() -> Film {
        Film {
            id: Some(4),
            nazov: "Metropolis".to_string(),
            rok: 1927,
            reziser: vec![Person::new("Fritz", "Lang").with_id(8)],
            ..Film::empty()
        }
    }

    fn editor(store: Arc<MemoryStore>) -> FilmEditor {
        FilmEditor::with_form(store, FilmEditForm::with_current_year(&lists(), 2026))
    }

    #[test]
    fn test_route_film_id() {
        assert_eq!(route_film_id(Some("42")), Some(42));
        assert_eq!(route_film_id(Some(" 7 ")), Some(7));
        assert_eq!(route_film_id(Some("0")), None);
        assert_eq!(route_film_id(Some("")), None);
        assert_eq!(route_film_id(Some("new")), None);
        assert_eq!(route_film_id(Some("-3")), None);
        assert_eq!(route_film_id(None), None);
    }

    #[tokio::test]
    async fn test_open_existing_film_populates_form() {
        let store = Arc::new(MemoryStore::with_film(metropolis()));
        let mut editor = editor(store);

        editor.open(Some("4")).await.unwrap();
        assert_eq!(editor.film_id(), Some(4));
        assert_eq!(editor.form().nazov.value(), "Metropolis");
        assert_eq!(editor.form().reziser().len(), 1);
    }

    #[tokio::test]
    async fn test_open_without_id_starts_blank() {
        let store = Arc::new(MemoryStore::default());
        let mut editor = editor(store);

        editor.open(None).await.unwrap();
        assert_eq!(editor.film_id(), None);
        assert_eq!(editor.film(), &Film::empty());
        assert_eq!(*editor.form().rok.value(), Some(0));
        assert!(!editor.form().is_valid());
    }

    #[tokio::test]
    async fn test_open_missing_film_fails() {
        let store = Arc::new(MemoryStore::default());
        let mut editor = editor(store);

        let err = editor.open(Some("9")).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_and_submit_existing_film() {
        let store = Arc::new(MemoryStore::with_film(metropolis()));
        let mut editor = editor(store.clone());
        editor.open(Some("4")).await.unwrap();

        editor.form_mut().slovensky_nazov.set_value(" Metropola ".to_string());
        editor.form_mut().set_ranking("AFI 2007", Some(95)).unwrap();
        let saved = editor.submit().await.unwrap();

        assert_eq!(saved.id, Some(4));
        let sent = store.saved.lock().unwrap()[0].clone();
        assert_eq!(sent.id, Some(4));
        assert_eq!(sent.slovensky_nazov, "Metropola");
        assert_eq!(sent.reziser, metropolis().reziser);
        assert_eq!(sent.poradie_v_rebricku.len(), 1);
        assert!(!editor.form().is_dirty());
    }

    #[tokio::test]
    async fn test_submit_new_film_takes_server_id() {
        let store = Arc::new(MemoryStore::default());
        let mut editor = editor(store.clone());
        editor.open(Some("0")).await.unwrap();

        editor.form_mut().nazov.set_value("M".to_string());
        editor.form_mut().rok.set_value(Some(1931));
        let saved = editor.submit().await.unwrap();

        assert_eq!(store.saved.lock().unwrap()[0].id, None);
        assert_eq!(saved.id, Some(100));
        assert_eq!(editor.film_id(), Some(100));
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let store = Arc::new(MemoryStore::default());
        let mut editor = editor(store.clone());
        editor.open(None).await.unwrap();

        let err = editor.submit().await.unwrap_err();
        assert!(matches!(err, EditorError::Form(FormError::Invalid(_))));
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edits() {
        let store = Arc::new(MemoryStore {
            films: Mutex::new(vec![metropolis()]),
            fail_saves: true,
            ..MemoryStore::default()
        });
        let mut editor = editor(store);
        editor.open(Some("4")).await.unwrap();
        editor.form_mut().nazov.set_value("Metropolis (restored)".to_string());

        let err = editor.submit().await.unwrap_err();
        assert!(matches!(err, EditorError::Client(ClientError::Server { status: 500, .. })));
        assert!(editor.form().is_dirty());
        assert_eq!(editor.film().nazov, "Metropolis");
    }
}

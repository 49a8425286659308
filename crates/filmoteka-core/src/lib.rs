pub mod control;
pub mod editor;
pub mod error;
pub mod film_form;

pub use control::{FieldValue, FormControl, ValidationError, Validator};
pub use editor::{route_film_id, FilmEditor};
pub use error::{EditorError, FieldError, FormError};
pub use film_form::{FilmEditForm, PersonForm, PostavaForm, RankingGroup, MIN_YEAR};

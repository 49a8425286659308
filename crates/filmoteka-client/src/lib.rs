pub mod error;
pub mod films;
pub mod notify;
pub mod traits;

pub use error::ClientError;
pub use films::{FilmsQuery, FilmsService, FILMS_ROUTE};
pub use notify::{RecordingNavigator, RecordingNotifier};
pub use traits::{FilmStore, Navigator, Notifier};

mod de;
pub mod film;
pub mod films_response;
pub mod person;
pub mod postava;

pub use film::{Film, Rankings};
pub use films_response::FilmsResponse;
pub use person::Person;
pub use postava::Postava;

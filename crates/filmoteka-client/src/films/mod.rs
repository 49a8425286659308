pub mod api;
pub mod query;
pub mod service;

#[cfg(test)]
mod tests;

pub use query::FilmsQuery;
pub use service::{FilmsService, FILMS_ROUTE};

use filmoteka_client::ClientError;
use std::fmt;
use thiserror::Error;
use crate::control::ValidationError;

/// A validation failure at a field path such as `rok` or `poradieVRebricku.AFI 1998`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub error: ValidationError,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form is invalid: {}", join_errors(.0))]
    Invalid(Vec<FieldError>),
    #[error("{list} has no entry {index} (it has {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
    #[error("unknown ranking list '{0}'")]
    UnknownRanking(String),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

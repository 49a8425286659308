use serde::{Deserialize, Serialize};
use crate::film::Film;

/// One page of the film list plus the total number of matching films
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilmsResponse {
    pub items: Vec<Film>,
    pub total_count: u64,
}

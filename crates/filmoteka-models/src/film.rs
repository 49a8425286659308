use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::person::Person;
use crate::postava::Postava;

/// Rank position per ranking list name (e.g. "AFI 1998" -> 4).
/// Only lists the film actually appears in are present.
pub type Rankings = BTreeMap<String, u32>;

/// A film record as exchanged with the server.
///
/// The server replaces the whole record on save, so every field is always sent.
/// `id` is the only exception: new records have none and omit it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub nazov: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub rok: i32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub slovensky_nazov: String,
    #[serde(rename = "imdbID", default, deserialize_with = "crate::de::null_as_default")]
    pub imdb_id: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub reziser: Vec<Person>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub postava: Vec<Postava>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub poradie_v_rebricku: Rankings,
}

impl Film {
    /// The blank record used when creating a new film
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Title with the year appended when known, for list views and messages
    pub fn display_title(&self) -> String {
        if self.rok > 0 {
            format!("{} ({})", self.nazov, self.rok)
        } else {
            self.nazov.clone()
        }
    }
}

use serde::{Deserialize, Serialize};
use crate::person::Person;

/// A cast entry: the character, its billing importance and the actor playing it.
///
/// The actor is owned by the entry; two entries never share a `Person` value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Postava {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub postava: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub dolezitost: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub herec: Person,
}

impl Postava {
    pub fn new(postava: impl Into<String>, dolezitost: impl Into<String>, herec: Person) -> Self {
        Self {
            postava: postava.into(),
            dolezitost: dolezitost.into(),
            herec,
        }
    }
}

use serde::{Deserialize, Serialize};

/// A person credited on a film, either as director or as the actor of a cast entry.
///
/// `id` is assigned by the server; persons entered in the editor have none until saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub krstne_meno: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub stredne_meno: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub priezvisko: String,
}

impl Person {
    pub fn new(krstne_meno: impl Into<String>, priezvisko: impl Into<String>) -> Self {
        Self {
            id: None,
            krstne_meno: krstne_meno.into(),
            stredne_meno: String::new(),
            priezvisko: priezvisko.into(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// "first [middle] surname", skipping empty parts
    pub fn full_name(&self) -> String {
        [&self.krstne_meno, &self.stredne_meno, &self.priezvisko]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_skips_empty_middle_name() {
        let person = Person::new("Stanley", "Kubrick");
        assert_eq!(person.full_name(), "Stanley Kubrick");

        let person = Person {
            stredne_meno: "Francis".to_string(),
            ..Person::new("Ford", "Coppola")
        };
        assert_eq!(person.full_name(), "Ford Francis Coppola");
    }

    #[test]
    fn test_missing_middle_name_and_id_deserialize() {
        let person: Person =
            serde_json::from_str(r#"{"krstneMeno":"Orson","priezvisko":"Welles"}"#).unwrap();
        assert_eq!(person.id, None);
        assert_eq!(person.stredne_meno, "");

        let json = serde_json::to_value(&person).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["krstneMeno"], "Orson");
    }

    #[test]
    fn test_null_names_deserialize_as_empty() {
        let person: Person = serde_json::from_str(
            r#"{"id": 2, "krstneMeno": "Akira", "stredneMeno": null, "priezvisko": "Kurosawa"}"#,
        )
        .unwrap();
        assert_eq!(person.id, Some(2));
        assert_eq!(person.stredne_meno, "");
        assert_eq!(person.full_name(), "Akira Kurosawa");
    }
}

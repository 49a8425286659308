use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const AUTH_TOKEN_KEY: &str = "auth_token";
const AUTH_TOKEN_SAVED_KEY: &str = "auth_token_saved_at";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat key/value TOML file holding the API token.
///
/// Obtaining the token is someone else's job; this store only keeps whatever
/// was handed to `filmoteka config token`.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    /// The stored API token; blank values count as no token
    pub fn get_auth_token(&self) -> Option<&String> {
        self.get(AUTH_TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn set_auth_token(&mut self, token: String) {
        self.set(AUTH_TOKEN_KEY.to_string(), token);
        self.set(AUTH_TOKEN_SAVED_KEY.to_string(), Utc::now().to_rfc3339());
    }

    pub fn clear_auth_token(&mut self) {
        self.remove(AUTH_TOKEN_KEY);
        self.remove(AUTH_TOKEN_SAVED_KEY);
    }

    pub fn get_auth_token_saved_at(&self) -> Option<DateTime<Utc>> {
        self.get(AUTH_TOKEN_SAVED_KEY)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_auth_token("secret-token".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_auth_token(), Some(&"secret-token".to_string()));
        let saved_at = loaded_store.get_auth_token_saved_at().unwrap();
        assert!((Utc::now() - saved_at).num_seconds().abs() < 5);
    }

    #[test]
    fn test_blank_token_is_no_token() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/filmoteka-unused"));
        store.set_auth_token("   ".to_string());
        assert_eq!(store.get_auth_token(), None);
    }

    #[test]
    fn test_clear_auth_token() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/filmoteka-unused"));
        store.set_auth_token("abc".to_string());
        store.set("other".to_string(), "kept".to_string());

        store.clear_auth_token();
        assert_eq!(store.get_auth_token(), None);
        assert_eq!(store.get_auth_token_saved_at(), None);
        assert_eq!(store.get("other"), Some(&"kept".to_string()));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.load().unwrap();
        assert_eq!(store.get_auth_token(), None);
    }
}

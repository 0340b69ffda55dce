//! Profile Settings
//!
//! A small per-user profile kept in key-value storage under
//! `profile:{user_id}`. No validation and no conflict handling.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::KeyValueStorage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(user_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: user_id.to_string(),
            user_id: user_id.to_string(),
            full_name: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply form input; blank fields are cleared
    pub fn edited(&self, full_name: &str, avatar_url: &str) -> Self {
        Self {
            full_name: non_blank(full_name),
            avatar_url: non_blank(avatar_url),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Avatar fallback: up to two initials of the name, else the email's
/// first letter, else "U"
pub fn initials(full_name: &str, email: &str) -> String {
    let from_name: String = full_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    if !from_name.is_empty() {
        return from_name;
    }
    email
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

/// Profile persistence port
pub trait ProfileStore: Send + Sync {
    /// Stored profile, or a fresh one when none exists
    fn load(&self, user_id: &str) -> Result<Profile, StorageError>;
    fn save(&self, profile: &Profile) -> Result<(), StorageError>;
}

/// Profiles serialized as JSON into any key-value storage
pub struct StoredProfiles<S> {
    storage: S,
}

impl<S: KeyValueStorage> StoredProfiles<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn key(user_id: &str) -> String {
        format!("profile:{}", user_id)
    }
}

impl<S: KeyValueStorage> ProfileStore for StoredProfiles<S> {
    fn load(&self, user_id: &str) -> Result<Profile, StorageError> {
        match self.storage.get(&Self::key(user_id))? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => {
                debug!("[PROFILE] none stored for {}", user_id);
                Ok(Profile::new(user_id))
            }
        }
    }

    fn save(&self, profile: &Profile) -> Result<(), StorageError> {
        let json = serde_json::to_string(profile)?;
        self.storage.set(&Self::key(&profile.user_id), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn test_load_missing_returns_fresh_profile() {
        let store = StoredProfiles::new(MemoryStorage::default());
        let profile = store.load("u1").unwrap();
        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.full_name, None);
    }

    #[test]
    fn test_save_then_load() {
        let store = StoredProfiles::new(MemoryStorage::default());
        let profile = Profile::new("u1").edited("  Ana Pérez ", "");
        store.save(&profile).unwrap();

        let loaded = store.load("u1").unwrap();
        assert_eq!(loaded.full_name.as_deref(), Some("Ana Pérez"));
        assert_eq!(loaded.avatar_url, None);
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let storage = MemoryStorage::default();
        storage.set("profile:u1", "{not json").unwrap();
        let store = StoredProfiles::new(storage);
        assert!(matches!(store.load("u1"), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ana maría pérez", "x@y.es"), "AM");
        assert_eq!(initials("  ana  ", "x@y.es"), "A");
        assert_eq!(initials("", "beto@y.es"), "B");
        assert_eq!(initials("", ""), "U");
    }
}

use trivia_core::{ScoreRecord, SortPreference};

use crate::{KeyValueBackend, Result};

pub const SCORES_KEY: &str = "scores";
pub const SORT_KEY: &str = "scoreSort";
pub const CURRENT_USER_KEY: &str = "triviaCurrentUser";

/// Durable storage for score records and player preferences.
///
/// Reads fail closed: a missing or malformed value comes back as the empty
/// or default value and is never an error.
pub trait StorageAdapter {
    fn load(&self) -> Vec<ScoreRecord>;

    /// Overwrite the persisted records with `records`.
    fn save(&mut self, records: &[ScoreRecord]) -> Result<()>;

    fn load_preference(&self) -> SortPreference;

    fn save_preference(&mut self, preference: SortPreference) -> Result<()>;

    /// Remove every record. The sort preference is kept.
    fn clear(&mut self) -> Result<()>;

    fn load_current_user(&self) -> Option<String>;

    fn save_current_user(&mut self, name: &str) -> Result<()>;

    fn clear_current_user(&mut self) -> Result<()>;
}

/// [`StorageAdapter`] over a string key-value backend, using the same keys
/// and JSON encoding as the browser build.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage<B> {
    backend: B,
}

impl<B: KeyValueBackend> LocalStorage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: KeyValueBackend> StorageAdapter for LocalStorage<B> {
    fn load(&self) -> Vec<ScoreRecord> {
        let Some(raw) = self.backend.get(SCORES_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed {} value: {}", SCORES_KEY, e);
            Vec::new()
        })
    }

    fn save(&mut self, records: &[ScoreRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.backend.set(SCORES_KEY, json)
    }

    fn load_preference(&self) -> SortPreference {
        match self.backend.get(SORT_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored sort preference: {}", e);
                SortPreference::default()
            }),
            None => SortPreference::default(),
        }
    }

    fn save_preference(&mut self, preference: SortPreference) -> Result<()> {
        self.backend.set(SORT_KEY, preference.as_str().to_string())
    }

    fn clear(&mut self) -> Result<()> {
        self.backend.remove(SCORES_KEY)
    }

    fn load_current_user(&self) -> Option<String> {
        self.backend
            .get(CURRENT_USER_KEY)
            .filter(|name| !name.trim().is_empty())
    }

    fn save_current_user(&mut self, name: &str) -> Result<()> {
        self.backend.set(CURRENT_USER_KEY, name.to_string())
    }

    fn clear_current_user(&mut self) -> Result<()> {
        self.backend.remove(CURRENT_USER_KEY)
    }
}

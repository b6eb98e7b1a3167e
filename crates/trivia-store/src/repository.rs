use trivia_core::{scoreboard, ScoreRecord, ScoreboardView, SortPreference};

use crate::{Result, StorageAdapter};

/// Append-only score history backed by a [`StorageAdapter`].
///
/// Every read goes back to the adapter. `append` is load, push, save, so two
/// writers sharing one store can lose a record; the last full write wins.
pub struct ScoreRepository<S> {
    storage: S,
}

impl<S: StorageAdapter> ScoreRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Record a finished quiz stamped with the current time.
    pub fn append(&mut self, name: &str, correct: u32, total: u32) -> Result<ScoreRecord> {
        let record = ScoreRecord::new(name, correct, total)?;
        self.push(record)
    }

    /// Record a finished quiz with an explicit timestamp.
    pub fn push(&mut self, record: ScoreRecord) -> Result<ScoreRecord> {
        let mut records = self.storage.load();
        records.push(record.clone());
        self.storage.save(&records)?;

        tracing::info!(
            "Recorded score for {}: {}/{} ({} records)",
            record.name,
            record.correct,
            record.total,
            records.len()
        );

        Ok(record)
    }

    pub fn records(&self) -> Vec<ScoreRecord> {
        self.storage.load()
    }

    pub fn ranked_view(&self, preference: SortPreference) -> ScoreboardView {
        scoreboard::rank(&self.storage.load(), preference)
    }

    /// Ranked view using the stored sort preference.
    pub fn current_view(&self) -> ScoreboardView {
        self.ranked_view(self.storage.load_preference())
    }

    pub fn preference(&self) -> SortPreference {
        self.storage.load_preference()
    }

    pub fn set_preference(&mut self, preference: SortPreference) -> Result<()> {
        self.storage.save_preference(preference)?;
        tracing::info!("Scoreboard sort set to {}", preference);
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.storage.clear()?;
        tracing::info!("Cleared all scores");
        Ok(())
    }
}

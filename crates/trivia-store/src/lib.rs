pub mod adapter;
pub mod backend;
pub mod error;
pub mod repository;

// Re-exports
pub use adapter::{LocalStorage, StorageAdapter, CURRENT_USER_KEY, SCORES_KEY, SORT_KEY};
pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::{Error, Result};
pub use repository::ScoreRepository;

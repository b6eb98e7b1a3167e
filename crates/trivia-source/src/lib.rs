pub mod error;
pub mod opentdb;
pub mod schema;
pub mod source;

// Re-exports
pub use error::{Error, Result};
pub use opentdb::OpenTriviaClient;
pub use source::{FetchRequest, QuestionSource, MAX_AMOUNT};

pub mod error;
pub mod question;
pub mod record;
pub mod scoreboard;
pub mod session;

// Re-exports
pub use error::{Error, Result, ValidationError};
pub use question::{Difficulty, PresentedQuestion, Question, QuestionId};
pub use record::{ScoreRecord, SortPreference};
pub use scoreboard::{percent, rank, RankedEntry, ScoreboardView, TopScore};
pub use session::{FetchOutcome, FetchTicket, Grade, QuizSession, Submission};

use thiserror::Error;

use crate::QuestionId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid score record: {0}")]
    InvalidRecord(String),

    #[error("Invalid sort preference: {0}")]
    InvalidSortPreference(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// User-correctable reasons a quiz submission is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name before submitting")]
    EmptyName,

    #[error("Please answer question {number} before submitting")]
    Unanswered { id: QuestionId, number: usize },

    #[error("There are no questions to submit")]
    NoQuestions,
}

pub type Result<T> = std::result::Result<T, Error>;

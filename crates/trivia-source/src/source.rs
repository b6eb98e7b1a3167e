use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use trivia_core::{Difficulty, Question};

/// Largest batch the question service hands out in one request.
pub const MAX_AMOUNT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub amount: u32,
    pub category: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

impl FetchRequest {
    pub fn new(amount: u32) -> Self {
        Self {
            amount: amount.clamp(1, MAX_AMOUNT),
            category: None,
            difficulty: None,
        }
    }

    pub fn with_category(mut self, category: Option<u32>) -> Self {
        self.category = category;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Fetch a fresh set of multiple-choice questions.
    async fn fetch(&self, request: &FetchRequest) -> crate::Result<Vec<Question>>;
}

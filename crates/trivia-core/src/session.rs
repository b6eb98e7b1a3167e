use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use crate::{PresentedQuestion, Question, QuestionId, ValidationError};

/// Stamp handed out when a fetch starts. Only the ticket of the latest fetch
/// may install questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(usize),
    Failed(String),
    /// A newer fetch started before this one resolved; the result was dropped.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub correct: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub grade: Grade,
}

#[derive(Debug, Default)]
pub struct QuizSession {
    generation: u64,
    loading: bool,
    questions: Vec<Question>,
    last_error: Option<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, discarding the current question set.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.questions.clear();
        self.last_error = None;

        tracing::debug!("Starting question fetch (generation {})", self.generation);

        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of the fetch identified by `ticket`.
    pub fn complete_fetch<E: std::fmt::Display>(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<Vec<Question>, E>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            tracing::warn!(
                "Discarding superseded question fetch (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return FetchOutcome::Superseded;
        }

        self.loading = false;

        match result {
            Ok(questions) => {
                let count = questions.len();
                self.questions = questions;
                tracing::info!("Loaded {} questions", count);
                FetchOutcome::Loaded(count)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!("Question fetch failed: {}", message);
                self.questions.clear();
                self.last_error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions as drawn on the form, answers reshuffled on every call.
    pub fn present<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<PresentedQuestion> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| q.present(i + 1, rng))
            .collect()
    }

    pub fn grade(&self, answers: &HashMap<QuestionId, String>) -> Grade {
        let correct = self
            .questions
            .iter()
            .filter(|q| answers.get(&q.id).is_some_and(|a| q.is_correct(a)))
            .count();

        Grade {
            correct: correct as u32,
            total: self.questions.len() as u32,
        }
    }

    /// Validate and grade a submission. A rejected submission leaves the
    /// session untouched.
    pub fn submit(
        &self,
        name: &str,
        answers: &HashMap<QuestionId, String>,
    ) -> std::result::Result<Submission, ValidationError> {
        if self.questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }

        if let Some((i, question)) = self
            .questions
            .iter()
            .enumerate()
            .find(|(_, q)| !answers.contains_key(&q.id))
        {
            return Err(ValidationError::Unanswered {
                id: question.id.clone(),
                number: i + 1,
            });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Submission {
            name: name.to_string(),
            grade: self.grade(answers),
        })
    }
}

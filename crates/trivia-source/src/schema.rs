//! Wire format of the Open Trivia DB `api.php` endpoint.

use serde::Deserialize;
use trivia_core::Question;

use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct TriviaResponse {
    pub response_code: u32,
    #[serde(default)]
    pub results: Vec<TriviaItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriviaItem {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl TriviaResponse {
    /// Check the response code and convert every item.
    pub fn into_questions(self) -> Result<Vec<Question>> {
        if self.response_code != 0 {
            return Err(Error::Api {
                code: self.response_code,
                message: describe_response_code(self.response_code).to_string(),
            });
        }

        self.results
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.into_question(i))
            .collect()
    }
}

impl TriviaItem {
    fn into_question(self, index: usize) -> Result<Question> {
        if self.incorrect_answers.is_empty() {
            return Err(Error::Parse(format!(
                "question {} has no incorrect answers",
                index + 1
            )));
        }

        let mut question = Question::new(
            decode_entities(&self.question),
            decode_entities(&self.correct_answer),
            self.incorrect_answers
                .iter()
                .map(|a| decode_entities(a))
                .collect(),
        );

        if let Some(category) = self.category {
            question = question.with_category(decode_entities(&category));
        }
        if let Some(difficulty) = self.difficulty.and_then(|d| d.parse().ok()) {
            question = question.with_difficulty(difficulty);
        }

        Ok(question)
    }
}

pub fn describe_response_code(code: u32) -> &'static str {
    match code {
        0 => "success",
        1 => "not enough questions for the requested query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited, too many requests",
        _ => "unknown response code",
    }
}

/// Decode the HTML entities the service embeds in question text.
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

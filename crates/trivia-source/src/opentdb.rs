use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use trivia_core::Question;

use crate::{schema::TriviaResponse, Error, FetchRequest, QuestionSource, Result};

pub const DEFAULT_API_URL: &str = "https://opentdb.com";

/// Client for the Open Trivia DB question API.
pub struct OpenTriviaClient {
    client: Client,
    api_url: String,
}

impl OpenTriviaClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn query(request: &FetchRequest) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("amount", request.amount.to_string()),
            ("type", "multiple".to_string()),
        ];

        if let Some(category) = request.category {
            query.push(("category", category.to_string()));
        }
        if let Some(difficulty) = request.difficulty {
            query.push(("difficulty", difficulty.as_str().to_string()));
        }

        query
    }
}

impl Default for OpenTriviaClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl QuestionSource for OpenTriviaClient {
    fn name(&self) -> &str {
        "opentdb"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<Question>> {
        let url = format!("{}/api.php", self.api_url);
        tracing::debug!("Fetching {} questions from {}", request.amount, url);

        let response = self
            .client
            .get(&url)
            .query(&Self::query(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: TriviaResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Failed to parse question response: {}", e)))?;

        let questions = parsed.into_questions()?;
        tracing::info!("Fetched {} questions from {}", questions.len(), self.name());

        Ok(questions)
    }
}

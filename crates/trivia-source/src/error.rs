use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Question service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Question service error (code {code}): {message}")]
    Api { code: u32, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

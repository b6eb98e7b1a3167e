use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use trivia_core::Difficulty;
use trivia_source::opentdb::DEFAULT_API_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub data_file: PathBuf,
    pub question_amount: u32,
    pub category: Option<u32>,
    pub difficulty: Option<String>,
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Layer defaults, then `trivia.toml` (or `config_file`), then
    /// `TRIVIA_*` environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let builder = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("data_file", default_data_file().to_string_lossy().to_string())?
            .set_default("question_amount", 10)?
            .set_default("request_timeout_secs", 10)?;

        let builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("trivia").required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        tracing::debug!("Loaded settings: {:?}", settings);

        Ok(settings)
    }

    pub fn difficulty(&self) -> Result<Option<Difficulty>> {
        self.difficulty
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| d.parse().map_err(anyhow::Error::msg))
            .transpose()
    }
}

fn default_data_file() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".trivia").join("store.json")
}

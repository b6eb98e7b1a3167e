use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One completed quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreRecord")]
pub struct ScoreRecord {
    pub name: String,
    pub correct: u32,
    pub total: u32,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Deserialize)]
struct RawScoreRecord {
    name: String,
    correct: u32,
    total: u32,
    timestamp: i64,
}

impl TryFrom<RawScoreRecord> for ScoreRecord {
    type Error = Error;

    fn try_from(raw: RawScoreRecord) -> Result<Self> {
        Self::with_timestamp(raw.name, raw.correct, raw.total, raw.timestamp)
    }
}

impl ScoreRecord {
    /// Create a record stamped with the current time.
    pub fn new(name: impl Into<String>, correct: u32, total: u32) -> Result<Self> {
        Self::with_timestamp(name, correct, total, Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(
        name: impl Into<String>,
        correct: u32,
        total: u32,
        timestamp: i64,
    ) -> Result<Self> {
        if correct > total {
            return Err(Error::InvalidRecord(format!(
                "correct ({}) exceeds total ({})",
                correct, total
            )));
        }

        Ok(Self {
            name: name.into(),
            correct,
            total,
            timestamp,
        })
    }
}

/// Display ordering for the scoreboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPreference {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
}

impl SortPreference {
    pub const ALL: [SortPreference; 4] = [
        SortPreference::Newest,
        SortPreference::Oldest,
        SortPreference::Highest,
        SortPreference::Lowest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortPreference::Newest => "newest",
            SortPreference::Oldest => "oldest",
            SortPreference::Highest => "highest",
            SortPreference::Lowest => "lowest",
        }
    }
}

impl std::fmt::Display for SortPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortPreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortPreference::Newest),
            "oldest" => Ok(SortPreference::Oldest),
            "highest" => Ok(SortPreference::Highest),
            "lowest" => Ok(SortPreference::Lowest),
            _ => Err(Error::InvalidSortPreference(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = ScoreRecord::new("Alice", 7, 10).unwrap();

        assert_eq!(record.name, "Alice");
        assert_eq!(record.correct, 7);
        assert_eq!(record.total, 10);
        assert!(record.timestamp > 0);
    }

    #[test]
    fn test_correct_cannot_exceed_total() {
        let result = ScoreRecord::with_timestamp("Bob", 11, 10, 1);
        assert!(matches!(result, Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_zero_of_zero_is_valid() {
        let record = ScoreRecord::with_timestamp("Empty", 0, 0, 1).unwrap();
        assert_eq!(record.correct, 0);
        assert_eq!(record.total, 0);
    }

    #[test]
    fn test_record_json_shape() {
        let record = ScoreRecord::with_timestamp("Alice", 3, 5, 1_700_000_000_000).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Alice",
                "correct": 3,
                "total": 5,
                "timestamp": 1_700_000_000_000_i64,
            })
        );
    }

    #[test]
    fn test_deserialize_rejects_broken_invariant() {
        let json = r#"{"name":"Eve","correct":9,"total":3,"timestamp":1}"#;
        assert!(serde_json::from_str::<ScoreRecord>(json).is_err());
    }

    #[test]
    fn test_sort_preference_parsing() {
        assert_eq!("newest".parse::<SortPreference>().unwrap(), SortPreference::Newest);
        assert_eq!("HIGHEST".parse::<SortPreference>().unwrap(), SortPreference::Highest);
        assert_eq!(" lowest ".parse::<SortPreference>().unwrap(), SortPreference::Lowest);
        assert!("fastest".parse::<SortPreference>().is_err());
    }

    #[test]
    fn test_sort_preference_default_and_serde() {
        assert_eq!(SortPreference::default(), SortPreference::Newest);

        let json = serde_json::to_string(&SortPreference::Oldest).unwrap();
        assert_eq!(json, "\"oldest\"");

        for pref in SortPreference::ALL {
            assert_eq!(pref.as_str().parse::<SortPreference>().unwrap(), pref);
        }
    }
}

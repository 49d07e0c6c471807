// 🗓️ Election Configuration
// The reference election date is threaded explicitly into every
// date-derived computation. There is no global election date.

use crate::error::PollError;
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// ElectionConfig - the fixed reference against which recency is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionConfig {
    /// Election day; polls are measured backwards from here
    pub election_date: NaiveDate,

    /// Year appended to "M/D" poll-window tokens, which omit it
    pub poll_year: i32,
}

/// On-disk shape: poll_year may be omitted
#[derive(Debug, Deserialize)]
struct ConfigFile {
    election_date: NaiveDate,
    #[serde(default)]
    poll_year: Option<i32>,
}

impl ElectionConfig {
    /// Config whose polls are fielded in the election's own year
    pub fn new(election_date: NaiveDate) -> Self {
        ElectionConfig {
            election_date,
            poll_year: election_date.year(),
        }
    }

    /// Config for an election date given as YYYY-MM-DD
    pub fn from_date_str(date: &str) -> Result<Self, PollError> {
        let election_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            PollError::InvalidConfig(format!("election date `{}`: {}", date, e))
        })?;
        Ok(ElectionConfig::new(election_date))
    }

    /// Builder: override the year appended to poll windows
    pub fn with_poll_year(mut self, poll_year: i32) -> Self {
        self.poll_year = poll_year;
        self
    }

    /// Load config from JSON file
    ///
    /// ```json
    /// { "election_date": "2024-11-05", "poll_year": 2024 }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_json::from_str(content).context("Failed to parse election config JSON")?;

        let config = ElectionConfig::new(file.election_date);
        Ok(match file.poll_year {
            Some(year) => config.with_poll_year(year),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_year_defaults_to_election_year() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let config = ElectionConfig::new(date);
        assert_eq!(config.poll_year, 2024);
        assert_eq!(config.election_date, date);
    }

    #[test]
    fn test_from_date_str() {
        let config = ElectionConfig::from_date_str("2020-11-03").unwrap();
        assert_eq!(config.election_date, NaiveDate::from_ymd_opt(2020, 11, 3).unwrap());
        assert_eq!(config.poll_year, 2020);

        let err = ElectionConfig::from_date_str("11/03/2020").unwrap_err();
        assert_eq!(err.kind(), "invalid_config");
    }

    #[test]
    fn test_from_json_with_and_without_poll_year() {
        let config = ElectionConfig::from_json(r#"{"election_date": "2024-11-05"}"#).unwrap();
        assert_eq!(config.poll_year, 2024);

        let config =
            ElectionConfig::from_json(r#"{"election_date": "2025-01-10", "poll_year": 2024}"#)
                .unwrap();
        assert_eq!(config.poll_year, 2024);
        assert_eq!(config.election_date.year(), 2025);
    }

    #[test]
    fn test_from_json_rejects_bad_date() {
        assert!(ElectionConfig::from_json(r#"{"election_date": "November 5"}"#).is_err());
        assert!(ElectionConfig::from_json("{}").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = std::env::temp_dir().join(format!("poll_config_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("election.json");
        fs::write(&path, r#"{"election_date": "2024-11-05"}"#).unwrap();

        let config = ElectionConfig::from_file(&path).unwrap();
        assert_eq!(config.election_date, NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());

        assert!(ElectionConfig::from_file(dir.join("missing.json")).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}

// 📥 Ingestion - raw rows → poll records, with a malformed-row policy
//
// The core never recovers from a bad row. This layer decides whether a bad
// row aborts the table (Strict) or is logged and dropped (SkipMalformed).

use crate::config::ElectionConfig;
use crate::error::PollError;
use crate::poll::{PollRecord, RawPollRow};
use log::warn;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestPolicy {
    /// First malformed row fails the whole table
    #[default]
    Strict,

    /// Malformed rows are logged and dropped
    SkipMalformed,
}

/// A row dropped under SkipMalformed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// Zero-based position in the input table
    pub index: usize,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub records: Vec<PollRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl IngestOutcome {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Normalize a poll table under the given policy
pub fn ingest_rows(
    rows: &[RawPollRow],
    config: &ElectionConfig,
    policy: IngestPolicy,
) -> Result<IngestOutcome, PollError> {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match PollRecord::from_row(row, config) {
            Ok(record) => records.push(record),
            Err(err) if policy == IngestPolicy::SkipMalformed => {
                warn!(
                    "skipping poll row {} ({}): {} [{}]",
                    index,
                    row.name,
                    err,
                    err.kind()
                );
                skipped.push(SkippedRow {
                    index,
                    name: row.name.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(IngestOutcome { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> ElectionConfig {
        ElectionConfig::new(NaiveDate::from_ymd_opt(2024, 11, 3).unwrap())
    }

    fn rows() -> Vec<RawPollRow> {
        vec![
            RawPollRow::new("Good", "10/1 - 10/3", 800, 48.0, 46.0),
            RawPollRow::new("NoDash", "10/1", 800, 48.0, 46.0),
            RawPollRow::new("Empty", "10/2 - 10/4", 600, 0.0, 0.0),
            RawPollRow::new("NoSample", "10/2 - 10/4", 0, 48.0, 46.0),
            RawPollRow::new("AlsoGood", "10/5 - 10/8", 1000, 50.0, 45.0),
        ]
    }

    #[test]
    fn test_strict_propagates_first_error() {
        let err = ingest_rows(&rows(), &config(), IngestPolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), "malformed_date");
    }

    #[test]
    fn test_skip_malformed() {
        let outcome = ingest_rows(&rows(), &config(), IngestPolicy::SkipMalformed).unwrap();

        let names: Vec<&str> = outcome.records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Good", "AlsoGood"]);

        let skipped: Vec<usize> = outcome.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![1, 2, 3]);
        assert_eq!(outcome.skipped[0].name, "NoDash");
        assert!(!outcome.is_clean());
    }

    #[test]
    fn test_clean_table_is_same_under_both_policies() {
        let clean: Vec<RawPollRow> = rows()
            .into_iter()
            .filter(|r| r.name.contains("Good"))
            .collect();

        let strict = ingest_rows(&clean, &config(), IngestPolicy::Strict).unwrap();
        let lenient = ingest_rows(&clean, &config(), IngestPolicy::SkipMalformed).unwrap();
        assert_eq!(strict, lenient);
        assert!(strict.is_clean());
    }

    #[test]
    fn test_default_policy_is_strict() {
        assert_eq!(IngestPolicy::default(), IngestPolicy::Strict);
    }
}

// 📊 Poll Records - one normalized poll observation
//
// RawPollRow is the tabular shape produced by the acquisition layer.
// PollRecord is the immutable, normalized value built from it.

use crate::config::ElectionConfig;
use crate::error::PollError;
use crate::normalizer::{
    days_before_election, months_for_days, normalize_shares, parse_poll_window,
};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

// ============================================================================
// RAW ROW (input table)
// ============================================================================

/// One row of a poll table, exactly as the acquisition layer writes it
///
/// Columns are matched by header name, so column order does not matter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawPollRow {
    #[serde(rename = "Name")]
    pub name: String,

    /// Fielding window "M/D - M/D", year omitted
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Size")]
    pub size: i64,

    #[serde(rename = "Democrat")]
    pub democrat: f64,

    #[serde(rename = "Republican")]
    pub republican: f64,
}

impl RawPollRow {
    pub fn new(name: &str, date: &str, size: i64, democrat: f64, republican: f64) -> Self {
        RawPollRow {
            name: name.to_string(),
            date: date.to_string(),
            size,
            democrat,
            republican,
        }
    }
}

// ============================================================================
// POLL RECORD
// ============================================================================

/// PollRecord - normalized, comparable, immutable
///
/// Invariants (established by `from_raw`, no setters):
/// - size > 0
/// - share_dem + share_rep == 1 (within float tolerance)
/// - months_from_election > 0
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollRecord {
    name: String,
    size: u64,
    share_dem: f64,
    share_rep: f64,
    date: NaiveDate,
    days_before_election: i64,
    months_from_election: f64,
}

impl PollRecord {
    /// Build a record from raw fields against a given election
    ///
    /// Fails with MalformedDate, DivisionByZero, InvalidShare or
    /// InvalidSampleSize. Pure: no I/O, no hidden state.
    pub fn from_raw(
        name: &str,
        raw_date: &str,
        size: i64,
        raw_dem: f64,
        raw_rep: f64,
        config: &ElectionConfig,
    ) -> Result<Self, PollError> {
        if size <= 0 {
            return Err(PollError::InvalidSampleSize(size));
        }

        let (share_dem, share_rep) = normalize_shares(raw_dem, raw_rep)?;
        let date = parse_poll_window(raw_date, config.poll_year)?;
        let days = days_before_election(date, config.election_date);
        let months = months_for_days(days);

        debug!(
            "poll {} ({}): n={} dem={:.4} months={:.3}",
            name, date, size, share_dem, months
        );

        Ok(PollRecord {
            name: name.to_string(),
            size: size as u64,
            share_dem,
            share_rep,
            date,
            days_before_election: days,
            months_from_election: months,
        })
    }

    /// Build a record from a raw table row
    pub fn from_row(row: &RawPollRow, config: &ElectionConfig) -> Result<Self, PollError> {
        Self::from_raw(
            &row.name,
            &row.date,
            row.size,
            row.democrat,
            row.republican,
            config,
        )
    }

    /// Pollster label (opaque, not unique)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn share_dem(&self) -> f64 {
        self.share_dem
    }

    pub fn share_rep(&self) -> f64 {
        self.share_rep
    }

    /// Start of the fielding window
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whole days from poll start to election day (negative after it)
    pub fn days_before_election(&self) -> i64 {
        self.days_before_election
    }

    pub fn months_from_election(&self) -> f64 {
        self.months_from_election
    }

    /// Whether this poll falls inside a recency window (inclusive)
    ///
    /// Months are the canonical framing: a poll exactly `d/30` months out is
    /// inside a window of `d/30`. Day-based filters must convert through
    /// `normalizer::months_for_days` to agree with this.
    pub fn within_window(&self, window_months: f64) -> bool {
        self.months_from_election <= window_months
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::ELECTION_DAY_MONTHS;

    fn config() -> ElectionConfig {
        ElectionConfig::new(NaiveDate::from_ymd_opt(2024, 11, 3).unwrap())
    }

    #[test]
    fn test_poll_record_creation() {
        let poll = PollRecord::from_raw("Emerson", "9/30 - 10/3", 1000, 48.0, 47.0, &config())
            .unwrap();

        assert_eq!(poll.name(), "Emerson");
        assert_eq!(poll.size(), 1000);
        assert_eq!(poll.date(), NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
        assert!((poll.share_dem() - 48.0 / 95.0).abs() < 1e-12);
        assert!((poll.share_dem() + poll.share_rep() - 1.0).abs() < 1e-12);
        assert!((poll.months_from_election() - 34.0 / 30.0).abs() < 1e-12);
        assert_eq!(poll.days_before_election(), 34);
    }

    #[test]
    fn test_poll_record_after_election_is_clamped() {
        let poll = PollRecord::from_raw("Late", "11/5 - 11/6", 500, 50.0, 50.0, &config())
            .unwrap();
        assert_eq!(poll.months_from_election(), ELECTION_DAY_MONTHS);
        assert!(poll.within_window(ELECTION_DAY_MONTHS));
    }

    #[test]
    fn test_poll_record_rejects_bad_size() {
        for size in [0, -1, -600] {
            let err = PollRecord::from_raw("X", "9/30 - 10/3", size, 48.0, 47.0, &config())
                .unwrap_err();
            assert_eq!(err, PollError::InvalidSampleSize(size));
        }
    }

    #[test]
    fn test_poll_record_propagates_normalizer_errors() {
        let err = PollRecord::from_raw("X", "9/30", 100, 48.0, 47.0, &config()).unwrap_err();
        assert_eq!(err.kind(), "malformed_date");

        let err = PollRecord::from_raw("X", "9/30 - 10/3", 100, 0.0, 0.0, &config()).unwrap_err();
        assert_eq!(err.kind(), "division_by_zero");
    }

    #[test]
    fn test_poll_record_uses_configured_poll_year() {
        let config = config().with_poll_year(2023);
        let poll = PollRecord::from_raw("X", "11/1 - 11/2", 100, 1.0, 1.0, &config).unwrap();
        assert_eq!(poll.date(), NaiveDate::from_ymd_opt(2023, 11, 1).unwrap());
        // A year and two days before the election
        assert!((poll.months_from_election() - 368.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_row_matches_from_raw() {
        let row = RawPollRow::new("Marist", "10/1 - 10/4", 1200, 51.0, 47.0);
        let a = PollRecord::from_row(&row, &config()).unwrap();
        let b = PollRecord::from_raw("Marist", "10/1 - 10/4", 1200, 51.0, 47.0, &config())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_raw_row_deserializes_by_header_name() {
        // Original acquisition layer writes Republican before Democrat
        let data = "Name,Date,Republican,Democrat,Size\nQuinnipiac,9/30 - 10/3,46.0,49.0,1400\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let row: RawPollRow = rdr.deserialize().next().unwrap().unwrap();

        assert_eq!(row, RawPollRow::new("Quinnipiac", "9/30 - 10/3", 1400, 49.0, 46.0));
    }
}

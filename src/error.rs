// ⚠️ Poll Errors - typed failures of the core model
//
// Every construction-time error is terminal for its row. The ingestion layer
// decides whether to skip or abort; the core never substitutes defaults.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PollError {
    /// Poll window text is not "M/D - M/D" or its start token is not a date
    #[error("malformed poll date `{text}`: {reason}")]
    MalformedDate { text: String, reason: String },

    /// Democrat + Republican raw shares sum to zero
    #[error("cannot normalize shares: democrat ({dem}) + republican ({rep}) is zero")]
    DivisionByZero { dem: f64, rep: f64 },

    /// Raw vote share is negative, NaN or infinite
    #[error("invalid raw {party} share {value}: must be a finite, non-negative number")]
    InvalidShare { party: &'static str, value: f64 },

    /// Sample size is zero or negative
    #[error("invalid sample size {0}: must be positive")]
    InvalidSampleSize(i64),

    /// Historical share outside [0, 1] or not a number
    #[error("invalid historical share {share} for {region} in {year}: must be within [0, 1]")]
    InvalidHistoricalShare { region: String, year: i32, share: f64 },

    /// Historical lookup for a year that has no recorded result
    #[error("no historical result for {region} in {year}")]
    UnknownYear { region: String, year: i32 },

    /// Recency window is negative, NaN or infinite
    #[error("invalid recency window {0}: must be a finite, non-negative number of months")]
    InvalidWindow(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PollError {
    pub(crate) fn malformed_date(text: &str, reason: impl Into<String>) -> Self {
        PollError::MalformedDate {
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used in ingestion logs
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::MalformedDate { .. } => "malformed_date",
            PollError::DivisionByZero { .. } => "division_by_zero",
            PollError::InvalidShare { .. } => "invalid_share",
            PollError::InvalidSampleSize(_) => "invalid_sample_size",
            PollError::InvalidHistoricalShare { .. } => "invalid_historical_share",
            PollError::UnknownYear { .. } => "unknown_year",
            PollError::InvalidWindow(_) => "invalid_window",
            PollError::InvalidConfig(_) => "invalid_config",
        }
    }
}

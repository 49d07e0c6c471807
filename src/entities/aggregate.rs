// 🧺 Poll Aggregate - shared core of every entity
//
// Owns the normalized polls for one geographic entity and answers the
// windowed, sample-size-weighted average query. Immutable after construction.

use crate::config::ElectionConfig;
use crate::error::PollError;
use crate::poll::{PollRecord, RawPollRow};
use log::debug;
use serde::Serialize;
use std::fmt;

// ============================================================================
// WINDOW ESTIMATE
// ============================================================================

/// Result of a weighted-average query
///
/// `NoData` is an expected outcome (sparse polling), not an error, and is
/// never a probability: callers must match on it before using a share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum WindowEstimate {
    /// No poll falls inside the window
    NoData,

    /// Sample-size-weighted Democratic share in [0, 1]
    Share(f64),
}

impl WindowEstimate {
    pub fn share(&self) -> Option<f64> {
        match self {
            WindowEstimate::NoData => None,
            WindowEstimate::Share(share) => Some(*share),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, WindowEstimate::NoData)
    }
}

impl fmt::Display for WindowEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowEstimate::NoData => write!(f, "no data"),
            WindowEstimate::Share(share) => write!(f, "{:.2}%", share * 100.0),
        }
    }
}

// ============================================================================
// POLL AGGREGATE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PollAggregate {
    /// Input row order, not necessarily time-sorted
    polls: Vec<PollRecord>,
    config: ElectionConfig,
}

impl PollAggregate {
    /// Normalize every row; the first bad row fails the whole table
    pub fn from_rows(rows: &[RawPollRow], config: &ElectionConfig) -> Result<Self, PollError> {
        let polls = rows
            .iter()
            .map(|row| PollRecord::from_row(row, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_records(polls, config))
    }

    /// Wrap records already normalized against `config`
    pub fn from_records(polls: Vec<PollRecord>, config: &ElectionConfig) -> Self {
        PollAggregate {
            polls,
            config: *config,
        }
    }

    pub fn polls(&self) -> &[PollRecord] {
        &self.polls
    }

    pub fn config(&self) -> &ElectionConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.polls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polls.is_empty()
    }

    /// Polls with `months_from_election <= window_months` (input order)
    pub fn polls_in_window(&self, window_months: f64) -> Result<Vec<&PollRecord>, PollError> {
        check_window(window_months)?;
        Ok(self
            .polls
            .iter()
            .filter(|poll| poll.within_window(window_months))
            .collect())
    }

    /// Sample-size-weighted mean Democratic share over a recency window
    ///
    /// `sum(share_dem * size) / sum(size)` over polls inside the window.
    /// Sums run in input order; permuting rows changes the result only by
    /// floating-point rounding. No decay weighting beyond the hard cutoff.
    pub fn weighted_average_dem_share(
        &self,
        window_months: f64,
    ) -> Result<WindowEstimate, PollError> {
        let selected = self.polls_in_window(window_months)?;

        if selected.is_empty() {
            debug!("window {} months: no polls", window_months);
            return Ok(WindowEstimate::NoData);
        }

        let (weighted, total_size) = selected.iter().fold((0.0, 0.0), |(w, n), poll| {
            let size = poll.size() as f64;
            (w + poll.share_dem() * size, n + size)
        });

        debug!(
            "window {} months: {} polls, n={}",
            window_months,
            selected.len(),
            total_size
        );

        Ok(WindowEstimate::Share(weighted / total_size))
    }
}

fn check_window(window_months: f64) -> Result<(), PollError> {
    if window_months.is_finite() && window_months >= 0.0 {
        Ok(())
    } else {
        Err(PollError::InvalidWindow(window_months))
    }
}

// ============================================================================
// TESTS
// ============================================================================

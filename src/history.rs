// 🏛️ Historical Results - past Democratic two-party share by region and year
//
// Read-only reference data. Built once from vote-count rows and shared
// (behind Arc) by every StateEntity that needs a baseline.

use crate::error::PollError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One candidate's vote count for a region in an election year
///
/// Matches the columns of the public state-level presidential results
/// table; extra columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VoteCountRow {
    pub state_po: String,
    pub year: i32,
    pub party: String,
    pub candidatevotes: u64,
}

impl VoteCountRow {
    pub fn new(state_po: &str, year: i32, party: &str, candidatevotes: u64) -> Self {
        VoteCountRow {
            state_po: state_po.to_string(),
            year,
            party: party.to_string(),
            candidatevotes,
        }
    }

    fn party_is(&self, name: &str) -> bool {
        self.party.trim().eq_ignore_ascii_case(name)
    }
}

/// First Democratic and first Republican count seen for a region/year
#[derive(Default)]
struct MajorPartyVotes {
    dem: Option<u64>,
    rep: Option<u64>,
}

/// HistoricalResults - (region_code, year) → Democratic two-party share
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalResults {
    shares: BTreeMap<(String, i32), f64>,
}

impl HistoricalResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-computed shares; each must lie in [0, 1]
    pub fn from_shares<I>(shares: I) -> Result<Self, PollError>
    where
        I: IntoIterator<Item = (String, i32, f64)>,
    {
        let mut results = HistoricalResults::new();
        for (region, year, share) in shares {
            results.insert(&region, year, share)?;
        }
        Ok(results)
    }

    /// Derive shares from raw vote counts
    ///
    /// Per (region, year): `dem / (dem + rep)` using the first democrat and
    /// first republican row. No democrat row → 0.0. A democrat row without
    /// a republican row counts Republican votes as 0. Other parties are ignored.
    pub fn from_vote_counts(rows: &[VoteCountRow]) -> Result<Self, PollError> {
        let mut grouped: BTreeMap<(String, i32), MajorPartyVotes> = BTreeMap::new();

        for row in rows {
            let entry = grouped
                .entry((row.state_po.trim().to_string(), row.year))
                .or_default();

            if row.party_is("democrat") && entry.dem.is_none() {
                entry.dem = Some(row.candidatevotes);
            } else if row.party_is("republican") && entry.rep.is_none() {
                entry.rep = Some(row.candidatevotes);
            }
        }

        let mut shares = BTreeMap::new();
        for (key, votes) in grouped {
            let share = match votes.dem {
                None => 0.0,
                Some(dem) => {
                    let rep = votes.rep.unwrap_or(0);
                    let total = dem + rep;
                    if total == 0 {
                        return Err(PollError::DivisionByZero {
                            dem: dem as f64,
                            rep: rep as f64,
                        });
                    }
                    dem as f64 / total as f64
                }
            };
            debug!("historical share {} {}: {:.4}", key.0, key.1, share);
            shares.insert(key, share);
        }

        Ok(HistoricalResults { shares })
    }

    /// Add or replace a single share; NaN or values outside [0, 1] are rejected
    pub fn insert(&mut self, region: &str, year: i32, share: f64) -> Result<(), PollError> {
        if !(0.0..=1.0).contains(&share) {
            return Err(PollError::InvalidHistoricalShare {
                region: region.to_string(),
                year,
                share,
            });
        }
        self.shares.insert((region.to_string(), year), share);
        Ok(())
    }

    /// Democratic two-party share for a region in a year
    ///
    /// A missing year is an error, never a default.
    pub fn dem_share(&self, region: &str, year: i32) -> Result<f64, PollError> {
        self.shares
            .get(&(region.to_string(), year))
            .copied()
            .ok_or_else(|| PollError::UnknownYear {
                region: region.to_string(),
                year,
            })
    }

    /// Years with a recorded result for a region (ascending)
    pub fn years_for(&self, region: &str) -> Vec<i32> {
        self.shares
            .keys()
            .filter(|(r, _)| r == region)
            .map(|(_, year)| *year)
            .collect()
    }

    /// Distinct region codes (ascending)
    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self.shares.keys().map(|(r, _)| r.clone()).collect();
        regions.dedup();
        regions
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 🗺️ State Entity - state polls plus historical baseline
//
// Adds the region code and a shared, read-only historical results table.
// Baseline queries never default: a missing year is UnknownYear.

use super::{BaselineSummary, Entity, EntitySummary, PollAggregate};
use crate::config::ElectionConfig;
use crate::error::PollError;
use crate::history::HistoricalResults;
use crate::poll::{PollRecord, RawPollRow};
use std::sync::Arc;

/// Share above which a state counts as historically blue (strict)
pub const BLUE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct StateEntity {
    region_code: String,
    aggregate: PollAggregate,
    historical: Arc<HistoricalResults>,
}

impl StateEntity {
    pub fn new(
        region_code: &str,
        rows: &[RawPollRow],
        config: &ElectionConfig,
        historical: Arc<HistoricalResults>,
    ) -> Result<Self, PollError> {
        Ok(StateEntity {
            region_code: region_code.to_string(),
            aggregate: PollAggregate::from_rows(rows, config)?,
            historical,
        })
    }

    pub fn from_records(
        region_code: &str,
        records: Vec<PollRecord>,
        config: &ElectionConfig,
        historical: Arc<HistoricalResults>,
    ) -> Self {
        StateEntity {
            region_code: region_code.to_string(),
            aggregate: PollAggregate::from_records(records, config),
            historical,
        }
    }

    /// Short geographic identifier, e.g. "PA"
    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    /// Democratic two-party share in a past election
    pub fn historical_dem_share(&self, year: i32) -> Result<f64, PollError> {
        self.historical.dem_share(&self.region_code, year)
    }

    /// Share strictly above 0.5; exactly 0.5 is NOT blue
    pub fn is_historically_blue(&self, year: i32) -> Result<bool, PollError> {
        Ok(self.historical_dem_share(year)? > BLUE_THRESHOLD)
    }

    /// Years with a recorded result for this state
    pub fn known_years(&self) -> Vec<i32> {
        self.historical.years_for(&self.region_code)
    }

    /// Summary plus the baseline for `year`
    pub fn summary_with_baseline(
        &self,
        windows: &[f64],
        year: i32,
    ) -> Result<EntitySummary, PollError> {
        let mut summary = self.summary(windows)?;
        let dem_share = self.historical_dem_share(year)?;
        summary.baseline = Some(BaselineSummary {
            year,
            dem_share,
            historically_blue: dem_share > BLUE_THRESHOLD,
        });
        Ok(summary)
    }
}

impl Entity for StateEntity {
    fn aggregate(&self) -> &PollAggregate {
        &self.aggregate
    }

    fn label(&self) -> String {
        self.region_code.clone()
    }
}

// 🇺🇸 National Entity - nationwide polls, no baseline queries

use super::{Entity, PollAggregate};
use crate::config::ElectionConfig;
use crate::error::PollError;
use crate::history::HistoricalResults;
use crate::poll::{PollRecord, RawPollRow};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct NationalEntity {
    aggregate: PollAggregate,

    /// Accepted for symmetry with StateEntity; no query reads it
    historical: Option<Arc<HistoricalResults>>,
}

impl NationalEntity {
    pub fn new(
        rows: &[RawPollRow],
        config: &ElectionConfig,
        historical: Option<Arc<HistoricalResults>>,
    ) -> Result<Self, PollError> {
        Ok(NationalEntity {
            aggregate: PollAggregate::from_rows(rows, config)?,
            historical,
        })
    }

    pub fn from_records(
        records: Vec<PollRecord>,
        config: &ElectionConfig,
        historical: Option<Arc<HistoricalResults>>,
    ) -> Self {
        NationalEntity {
            aggregate: PollAggregate::from_records(records, config),
            historical,
        }
    }

    pub fn historical(&self) -> Option<&HistoricalResults> {
        self.historical.as_deref()
    }
}

impl Entity for NationalEntity {
    fn aggregate(&self) -> &PollAggregate {
        &self.aggregate
    }

    fn label(&self) -> String {
        "National".to_string()
    }
}

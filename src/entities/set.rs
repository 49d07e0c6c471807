// 🗂️ Entity Set - the nation plus every polled state for one election

use super::{Entity, EntitySummary, NationalEntity, StateEntity};
use crate::config::ElectionConfig;
use crate::error::PollError;
use crate::history::HistoricalResults;
use crate::ingest::{ingest_rows, IngestPolicy, SkippedRow};
use crate::poll::RawPollRow;
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EntitySet {
    pub national: NationalEntity,

    /// Keyed by region code, ascending
    pub states: BTreeMap<String, StateEntity>,

    /// Rows dropped during ingestion, keyed by entity label
    pub skipped: BTreeMap<String, Vec<SkippedRow>>,
}

impl EntitySet {
    /// Build every entity from its poll table
    ///
    /// Under `Strict` the first malformed row anywhere fails the build.
    pub fn build(
        national_rows: &[RawPollRow],
        state_rows: &BTreeMap<String, Vec<RawPollRow>>,
        config: &ElectionConfig,
        historical: Arc<HistoricalResults>,
        policy: IngestPolicy,
    ) -> Result<Self, PollError> {
        let mut skipped = BTreeMap::new();

        let outcome = ingest_rows(national_rows, config, policy)?;
        if !outcome.is_clean() {
            skipped.insert("National".to_string(), outcome.skipped);
        }
        let national =
            NationalEntity::from_records(outcome.records, config, Some(Arc::clone(&historical)));

        let mut states = BTreeMap::new();
        for (code, rows) in state_rows {
            let outcome = ingest_rows(rows, config, policy)?;
            if !outcome.is_clean() {
                skipped.insert(code.clone(), outcome.skipped);
            }
            let state =
                StateEntity::from_records(code, outcome.records, config, Arc::clone(&historical));
            states.insert(code.clone(), state);
        }

        info!(
            "built {} state entities + national ({} national polls)",
            states.len(),
            national.polls().len()
        );

        Ok(EntitySet {
            national,
            states,
            skipped,
        })
    }

    pub fn state(&self, code: &str) -> Option<&StateEntity> {
        self.states.get(code)
    }

    /// States with at least one poll
    pub fn polled_states(&self) -> Vec<&StateEntity> {
        self.states
            .values()
            .filter(|state| !state.polls().is_empty())
            .collect()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.values().map(Vec::len).sum()
    }

    /// National first, then states by region code
    ///
    /// With `baseline_year`, state summaries include the historical
    /// baseline; a state missing that year fails with UnknownYear.
    pub fn summaries(
        &self,
        windows: &[f64],
        baseline_year: Option<i32>,
    ) -> Result<Vec<EntitySummary>, PollError> {
        let mut summaries = vec![self.national.summary(windows)?];

        for state in self.states.values() {
            let summary = match baseline_year {
                Some(year) => state.summary_with_baseline(windows, year)?,
                None => state.summary(windows)?,
            };
            summaries.push(summary);
        }

        Ok(summaries)
    }
}

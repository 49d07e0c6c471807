// Entity Models - nation and states
//
// Each entity has:
// - An immutable, ordered collection of normalized polls (PollAggregate)
// - The weighted-average query, shared through the Entity trait
// - States add a historical baseline (StateEntity)

pub mod aggregate;
pub mod national;
pub mod set;
pub mod state;

pub use aggregate::{PollAggregate, WindowEstimate};
pub use national::NationalEntity;
pub use set::EntitySet;
pub use state::{StateEntity, BLUE_THRESHOLD};

use crate::error::PollError;
use crate::poll::PollRecord;
use serde::Serialize;
use std::fmt;

// ============================================================================
// ENTITY TRAIT
// ============================================================================

/// Entity - anything that aggregates polls for one geography
///
/// Implementors only expose their aggregate; every query is provided.
pub trait Entity {
    fn aggregate(&self) -> &PollAggregate;

    /// Display label ("National", "PA", ...)
    fn label(&self) -> String;

    fn polls(&self) -> &[PollRecord] {
        self.aggregate().polls()
    }

    fn polls_in_window(&self, window_months: f64) -> Result<Vec<&PollRecord>, PollError> {
        self.aggregate().polls_in_window(window_months)
    }

    fn weighted_average_dem_share(
        &self,
        window_months: f64,
    ) -> Result<WindowEstimate, PollError> {
        self.aggregate().weighted_average_dem_share(window_months)
    }

    /// One estimate per requested window
    fn summary(&self, windows: &[f64]) -> Result<EntitySummary, PollError> {
        let windows = windows
            .iter()
            .map(|&window_months| -> Result<WindowSummary, PollError> {
                Ok(WindowSummary {
                    window_months,
                    poll_count: self.polls_in_window(window_months)?.len(),
                    estimate: self.weighted_average_dem_share(window_months)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EntitySummary {
            label: self.label(),
            poll_count: self.polls().len(),
            windows,
            baseline: None,
        })
    }
}

// ============================================================================
// SUMMARIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub window_months: f64,
    pub poll_count: usize,
    pub estimate: WindowEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineSummary {
    pub year: i32,
    pub dem_share: f64,
    pub historically_blue: bool,
}

/// Printable snapshot of an entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub label: String,
    pub poll_count: usize,
    pub windows: Vec<WindowSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselineSummary>,
}

impl fmt::Display for EntitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} {:>4} polls", self.label, self.poll_count)?;
        for window in &self.windows {
            write!(
                f,
                " | {:.1}mo: {} ({})",
                window.window_months, window.estimate, window.poll_count
            )?;
        }
        if let Some(baseline) = &self.baseline {
            write!(
                f,
                " | {} baseline {:.2}% ({})",
                baseline.year,
                baseline.dem_share * 100.0,
                if baseline.historically_blue { "blue" } else { "not blue" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ElectionConfig;
    use crate::poll::RawPollRow;
    use chrono::NaiveDate;

    fn nation() -> NationalEntity {
        let config = ElectionConfig::new(NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());
        let rows = vec![
            RawPollRow::new("A", "10/24 - 10/27", 300, 40.0, 60.0),
            RawPollRow::new("B", "9/30 - 10/3", 100, 60.0, 40.0),
        ];
        NationalEntity::new(&rows, &config, None).unwrap()
    }

    #[test]
    fn test_summary_per_window() {
        let summary = nation().summary(&[0.1, 0.5, 2.0]).unwrap();

        assert_eq!(summary.label, "National");
        assert_eq!(summary.poll_count, 2);
        assert_eq!(summary.windows[0].poll_count, 0);
        assert!(summary.windows[0].estimate.is_no_data());
        assert_eq!(summary.windows[1].poll_count, 1);
        assert_eq!(summary.windows[2].poll_count, 2);
        assert!((summary.windows[2].estimate.share().unwrap() - 0.45).abs() < 1e-12);
        assert!(summary.baseline.is_none());
    }

    #[test]
    fn test_summary_rejects_invalid_window() {
        assert!(nation().summary(&[1.0, -1.0]).is_err());
    }

    #[test]
    fn test_summary_display() {
        let summary = nation().summary(&[0.1, 2.0]).unwrap();
        assert_eq!(
            summary.to_string(),
            "National    2 polls | 0.1mo: no data (0) | 2.0mo: 45.00% (2)"
        );
    }

    #[test]
    fn test_summary_json() {
        let summary = nation().summary(&[0.1]).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["label"], "National");
        assert_eq!(json["windows"][0]["estimate"], "NoData");
        assert!(json.get("baseline").is_none());
    }
}

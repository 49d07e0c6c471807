// Poll Aggregator - Core Library
// Normalizes opinion polls and aggregates them per nation/state

pub mod config;
pub mod entities;
pub mod error;
pub mod history;
pub mod ingest;
pub mod loader;
pub mod normalizer;
pub mod poll;

// Re-export commonly used types
pub use config::ElectionConfig;
pub use entities::{
    BaselineSummary, Entity, EntitySet, EntitySummary, NationalEntity, PollAggregate,
    StateEntity, WindowEstimate, WindowSummary, BLUE_THRESHOLD,
};
pub use error::PollError;
pub use history::{HistoricalResults, VoteCountRow};
pub use ingest::{ingest_rows, IngestOutcome, IngestPolicy, SkippedRow};
pub use loader::{
    load_poll_directory, load_poll_table, load_region_codes, load_vote_counts, PollDirectory,
};
pub use normalizer::{
    months_from_election, normalize_shares, parse_poll_window, DAYS_PER_MONTH,
    ELECTION_DAY_MONTHS,
};
pub use poll::{PollRecord, RawPollRow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Recency windows (months) reported when none are requested
pub const DEFAULT_WINDOWS: [f64; 2] = [1.0, 3.0];

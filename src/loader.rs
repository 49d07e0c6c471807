// 📂 Loaders - flat files → raw tables
//
// On-disk layout written by the acquisition layer:
//   <data>/polls_<year>/<CODE>_<year>.dat   one per polled state
//   <data>/polls_<year>/national_<year>.dat
//   <data>/state_abbreviations.txt          "<name> <CODE>" per line
// plus a state-level vote-count CSV for historical results.

use crate::history::{HistoricalResults, VoteCountRow};
use crate::poll::RawPollRow;
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Raw poll tables for one election year
#[derive(Debug, Clone, Default)]
pub struct PollDirectory {
    pub national: Vec<RawPollRow>,

    /// Every requested region code; unpolled states map to an empty table
    pub states: BTreeMap<String, Vec<RawPollRow>>,
}

impl PollDirectory {
    pub fn poll_count(&self) -> usize {
        self.national.len() + self.states.values().map(Vec::len).sum::<usize>()
    }
}

/// Read a poll table from any CSV source
pub fn read_poll_table<R: io::Read>(reader: R) -> Result<Vec<RawPollRow>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize().enumerate() {
        let row: RawPollRow =
            result.with_context(|| format!("Failed to deserialize poll row {}", index))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load one poll table; an empty or header-only file yields no rows
pub fn load_poll_table(path: &Path) -> Result<Vec<RawPollRow>> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open poll table: {:?}", path))?;

    read_poll_table(file).with_context(|| format!("Failed to read poll table: {:?}", path))
}

/// Load the national table and one table per region code
///
/// A missing state file means "no polls"; a missing national file is an error.
pub fn load_poll_directory(dir: &Path, year: i32, region_codes: &[String]) -> Result<PollDirectory> {
    let mut states = BTreeMap::new();

    for code in region_codes {
        let path = dir.join(format!("{}_{}.dat", code, year));
        let rows = if path.exists() {
            load_poll_table(&path)?
        } else {
            debug!("no poll file for {} ({:?})", code, path);
            Vec::new()
        };
        states.insert(code.clone(), rows);
    }

    let national_path = dir.join(format!("national_{}.dat", year));
    let national = load_poll_table(&national_path)?;

    let directory = PollDirectory { national, states };
    info!(
        "loaded {} polls from {:?} ({} regions)",
        directory.poll_count(),
        dir,
        region_codes.len()
    );

    Ok(directory)
}

/// Parse region codes: second whitespace-separated column of each line
pub fn parse_region_codes(content: &str) -> Result<Vec<String>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            line.split_whitespace()
                .nth(1)
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Line {} has no region code column: {:?}", number + 1, line))
        })
        .collect()
}

pub fn load_region_codes(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read region codes: {:?}", path))?;

    parse_region_codes(&content).with_context(|| format!("Invalid region codes file: {:?}", path))
}

/// Read vote-count rows from any CSV source
pub fn read_vote_counts<R: io::Read>(reader: R) -> Result<Vec<VoteCountRow>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: VoteCountRow = result.context("Failed to deserialize vote count row")?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load historical results from a state-level vote-count CSV
pub fn load_vote_counts(path: &Path) -> Result<HistoricalResults> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open results file: {:?}", path))?;
    let rows = read_vote_counts(file)?;

    let results = HistoricalResults::from_vote_counts(&rows)
        .with_context(|| format!("Invalid vote counts in {:?}", path))?;
    info!(
        "loaded {} historical results for {} regions",
        results.len(),
        results.regions().len()
    );

    Ok(results)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("poll_loader_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const TABLE: &str = "Name,Date,Republican,Democrat,Size\n\
                         Emerson,10/25 - 10/28,49.0,49.0,800\n\
                         Marist,9/10 - 9/14,47.0,50.0,1200\n";

    #[test]
    fn test_read_poll_table() {
        let rows = read_poll_table(TABLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], RawPollRow::new("Marist", "9/10 - 9/14", 1200, 50.0, 47.0));
    }

    #[test]
    fn test_read_poll_table_empty_and_header_only() {
        assert!(read_poll_table("".as_bytes()).unwrap().is_empty());
        assert!(read_poll_table("Name,Date,Republican,Democrat,Size\n".as_bytes())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_read_poll_table_bad_size() {
        let data = "Name,Date,Republican,Democrat,Size\nX,10/1 - 10/2,40,50,LV\n";
        assert!(read_poll_table(data.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_region_codes() {
        let content = "Alabama AL\nAlaska AK\n\nPennsylvania PA\n";
        assert_eq!(parse_region_codes(content).unwrap(), vec!["AL", "AK", "PA"]);

        assert!(parse_region_codes("Alabama\n").is_err());
    }

    #[test]
    fn test_load_poll_directory() {
        let dir = scratch_dir("directory");
        fs::write(dir.join("PA_2024.dat"), TABLE).unwrap();
        fs::write(dir.join("national_2024.dat"), TABLE).unwrap();

        let codes = vec!["OH".to_string(), "PA".to_string()];
        let directory = load_poll_directory(&dir, 2024, &codes).unwrap();

        assert_eq!(directory.national.len(), 2);
        assert_eq!(directory.states["PA"].len(), 2);
        assert!(directory.states["OH"].is_empty());
        assert_eq!(directory.poll_count(), 4);

        // No national table for another year
        assert!(load_poll_directory(&dir, 2020, &codes).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_vote_counts_ignores_extra_columns() {
        let data = "year,state,state_po,party,candidatevotes,totalvotes\n\
                    2016,Pennsylvania,PA,democrat,2926441,6115402\n\
                    2016,Pennsylvania,PA,republican,2970733,6115402\n";
        let rows = read_vote_counts(data.as_bytes()).unwrap();
        assert_eq!(rows[0], VoteCountRow::new("PA", 2016, "democrat", 2_926_441));

        let results = HistoricalResults::from_vote_counts(&rows).unwrap();
        assert!(results.dem_share("PA", 2016).unwrap() < 0.5);
    }

    #[test]
    fn test_load_vote_counts() {
        let dir = scratch_dir("votes");
        let path = dir.join("results.csv");
        fs::write(
            &path,
            "state_po,year,party,candidatevotes\nVT,2016,democrat,178573\nVT,2016,republican,95369\n",
        )
        .unwrap();

        let results = load_vote_counts(&path).unwrap();
        assert!(results.dem_share("VT", 2016).unwrap() > 0.5);
        assert!(load_vote_counts(&dir.join("missing.csv")).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}

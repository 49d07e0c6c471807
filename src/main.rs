use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use poll_aggregator::{
    load_poll_directory, load_region_codes, load_vote_counts, ElectionConfig, EntitySet,
    HistoricalResults, IngestPolicy, DEFAULT_WINDOWS,
};

const USAGE: &str = "Usage: poll-aggregator <polls_dir> <region_codes_file> <year> \
<election_date|config.json> [--results <csv>] [--window <months>]... [--lenient] [--json]";

#[derive(Debug, PartialEq)]
struct CliArgs {
    polls_dir: PathBuf,
    region_codes: PathBuf,
    year: i32,
    election: String,
    results: Option<PathBuf>,
    windows: Vec<f64>,
    lenient: bool,
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    run(&cli)
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut results = None;
    let mut windows = Vec::new();
    let mut lenient = false;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--results" => {
                let path = iter.next().ok_or_else(|| anyhow!("--results needs a path"))?;
                results = Some(PathBuf::from(path));
            }
            "--window" => {
                let value = iter.next().ok_or_else(|| anyhow!("--window needs a value"))?;
                let months: f64 = value
                    .parse()
                    .with_context(|| format!("Invalid window: {}", value))?;
                windows.push(months);
            }
            "--lenient" => lenient = true,
            "--json" => json = true,
            flag if flag.starts_with("--") => return Err(anyhow!("Unknown flag: {}", flag)),
            _ => positional.push(arg.clone()),
        }
    }

    if positional.len() != 4 {
        return Err(anyhow!("Expected 4 arguments, got {}", positional.len()));
    }

    let year: i32 = positional[2]
        .parse()
        .with_context(|| format!("Invalid year: {}", positional[2]))?;

    if windows.is_empty() {
        windows = DEFAULT_WINDOWS.to_vec();
    }

    Ok(CliArgs {
        polls_dir: PathBuf::from(&positional[0]),
        region_codes: PathBuf::from(&positional[1]),
        year,
        election: positional[3].clone(),
        results,
        windows,
        lenient,
        json,
    })
}

fn load_config(election: &str) -> Result<ElectionConfig> {
    if election.ends_with(".json") {
        ElectionConfig::from_file(election)
    } else {
        Ok(ElectionConfig::from_date_str(election)?)
    }
}

fn run(cli: &CliArgs) -> Result<()> {
    let config = load_config(&cli.election)?;
    info!(
        "election {} (poll year {})",
        config.election_date, config.poll_year
    );

    let codes = load_region_codes(&cli.region_codes)?;
    let directory = load_poll_directory(&cli.polls_dir, cli.year, &codes)?;

    let historical = match &cli.results {
        Some(path) => load_vote_counts(path)?,
        None => HistoricalResults::new(),
    };
    let has_baseline = cli.results.is_some();

    let policy = if cli.lenient {
        IngestPolicy::SkipMalformed
    } else {
        IngestPolicy::Strict
    };

    let set = EntitySet::build(
        &directory.national,
        &directory.states,
        &config,
        Arc::new(historical),
        policy,
    )?;

    if set.skipped_count() > 0 {
        warn!("skipped {} malformed poll rows", set.skipped_count());
    }

    // Baseline is the previous presidential election
    let baseline_year = has_baseline.then(|| cli.year - 4);
    let summaries = set.summaries(&cli.windows, baseline_year)?;

    if cli.json {
        let mut output = BTreeMap::new();
        output.insert("summaries", serde_json::to_value(&summaries)?);
        output.insert("skipped", serde_json::to_value(&set.skipped)?);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("📊 Poll aggregates for {} (election {})", cli.year, config.election_date);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        for summary in &summaries {
            println!("{}", summary);
        }
    }

    Ok(())
}

//! Tally CLI
//!
//! Entry point for the benchmark. With no arguments it reproduces the
//! reference run: four strategies in fixed order, 10 workers, 10,000
//! increments each, printing per benchmark the strategy name, the elapsed
//! seconds and the final counter value. Logs go to stderr (RUST_LOG),
//! results to stdout.

mod commands;

use std::collections::HashSet;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tracing_subscriber::EnvFilter;

use tally_harness::{run_bench, BenchOptions, BenchReport, RetryPolicy, Strategy};
use tally_store::MemoryStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = commands::build_cli().get_matches();
    match run(&matches) {
        Ok(reports) => {
            if reports.iter().any(BenchReport::has_errors) {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(1);
        }
    }
}

fn run(matches: &ArgMatches) -> Result<Vec<BenchReport>> {
    let strategies = selected_strategies(matches)?;
    let options = bench_options(matches);

    let store = MemoryStore::new();
    let mut reports = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let report = run_bench(&store, strategy, &options)
            .with_context(|| format!("benchmark {strategy} failed"))?;
        if !matches.get_flag("json") {
            println!("{report}");
            for summary in report.worker_summaries.iter() {
                if let Some(error) = &summary.error {
                    eprintln!("worker {} stopped early: {}", summary.worker, error);
                }
            }
        }
        reports.push(report);
    }

    if matches.get_flag("json") {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("serializing reports")?
        );
    }
    Ok(reports)
}

/// Resolve `--strategy` into the fixed benchmark order
///
/// A subset is re-ordered to the canonical sequence; duplicates collapse.
fn selected_strategies(matches: &ArgMatches) -> Result<Vec<Strategy>> {
    match matches.get_many::<String>("strategy") {
        None => Ok(Strategy::ALL.to_vec()),
        Some(names) => {
            let mut picked = HashSet::new();
            for name in names {
                picked.insert(name.parse::<Strategy>()?);
            }
            Ok(Strategy::ALL
                .iter()
                .copied()
                .filter(|s| picked.contains(s))
                .collect())
        }
    }
}

fn bench_options(matches: &ArgMatches) -> BenchOptions {
    let mut retry = RetryPolicy::unbounded();
    if let Some(max) = matches.get_one::<u32>("max-attempts") {
        retry = RetryPolicy::bounded(*max);
    }
    if let Some(ms) = matches.get_one::<u64>("backoff-ms") {
        retry = retry.with_backoff(Duration::from_millis(*ms));
    }

    let mut options = BenchOptions::new()
        .workers(*matches.get_one::<usize>("workers").expect("has default"))
        .iterations(*matches.get_one::<u64>("iterations").expect("has default"))
        .retry(retry);
    if let Some(secs) = matches.get_one::<u64>("deadline-secs") {
        options = options.deadline(Duration::from_secs(*secs));
    }
    options
}

//! CLI definition

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the `tally` command line interface
pub fn build_cli() -> Command {
    Command::new("tally")
        .about("Benchmark concurrency-control strategies on a contended counter row")
        .long_about(
            "Runs the selected update strategies against an embedded transactional \
             store and prints, per benchmark, the strategy name, elapsed seconds and \
             the final counter value. With no --strategy, all four strategies run in \
             the fixed order: lost_update, in_place_update, row_lock_update, \
             optimistic_update.",
        )
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help(
                    "Strategy to run (repeatable): lost_update, in_place_update, \
                     row_lock_update, optimistic_update",
                ),
        )
        .arg(
            Arg::new("workers")
                .short('w')
                .long("workers")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("10")
                .help("Number of concurrent workers"),
        )
        .arg(
            Arg::new("iterations")
                .short('n')
                .long("iterations")
                .value_name("N")
                .value_parser(value_parser!(u64))
                .default_value("10000")
                .help("Increments per worker"),
        )
        .arg(
            Arg::new("max-attempts")
                .long("max-attempts")
                .value_name("N")
                .value_parser(value_parser!(u32))
                .help("Cap the optimistic strategy's attempts per increment (default: unbounded)"),
        )
        .arg(
            Arg::new("backoff-ms")
                .long("backoff-ms")
                .value_name("MS")
                .value_parser(value_parser!(u64))
                .help("Base backoff between optimistic retries (default: none)"),
        )
        .arg(
            Arg::new("deadline-secs")
                .long("deadline-secs")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Stop workers that run past this deadline (default: none)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit the reports as a JSON array instead of text"),
        )
}

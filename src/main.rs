use anyhow::Context;
use clap::Parser;
use mapreduce_engine::app::{handle_fatal_error, init_logging, AppConfig};
use mapreduce_engine::config::load_config;
use mapreduce_engine::wordcount::{count_words, WordCounts};
use mapreduce_engine::RunSummary;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Count words across files with an in-process MapReduce run
#[derive(Parser)]
#[command(name = "mapreduce-engine")]
#[command(version, about = "Count words across files with an in-process MapReduce run", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Number of worker threads (overrides config and MR_WORKERS)
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Number of partitions (overrides config and MR_PARTITIONS)
    #[arg(short = 'p', long)]
    partitions: Option<usize>,

    /// Print counts and run metrics as JSON
    #[arg(long)]
    json: bool,

    /// Input files
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    counts: &'a WordCounts,
    summary: &'a RunSummary,
}

fn main() {
    let cli = Cli::parse();
    let app_config = AppConfig::new(cli.verbose).with_json_output(cli.json);
    init_logging(&app_config);

    debug!("mapreduce-engine started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run_word_count(cli, &app_config) {
        handle_fatal_error(e, app_config.verbose);
    }
}

fn run_word_count(cli: Cli, app_config: &AppConfig) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    if let Some(partitions) = cli.partitions {
        config = config.with_partitions(partitions);
    }

    for file in &cli.files {
        if !file.is_file() {
            anyhow::bail!("Input file not found: {}", file.display());
        }
    }

    let (counts, summary) = count_words(cli.files, &config)?;

    if app_config.json_output {
        let report = JsonReport {
            counts: &counts,
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (word, count) in &counts {
            println!("{word} {count}");
        }
    }
    Ok(())
}

use std::fs::File;
use std::io::{stderr, stdout, BufReader, BufWriter};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use fraud_rule_engine::engine::{RuleEngine, RuleMatch};
use fraud_rule_engine::storage::RuleStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: fraud-rule-engine [rules].csv [transactions].csv [log_level:optional] > [matches].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let rules_path = &args[1];
    let transactions_path = &args[2];
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let storage = Arc::new(RuleStorage::new());
    let rules_file = File::open(rules_path)
        .with_context(|| format!("Unable to open rules CSV at path: {rules_path}"))?;
    let imported = storage.import_csv(BufReader::new(rules_file));

    info!("Loaded {imported} rules from {rules_path}");

    let engine = RuleEngine::new(storage);

    let timer = Instant::now();
    let matches = engine.run(transactions_path).await?;
    let duration = timer.elapsed();

    info!("Evaluated transactions in: {duration:?}");

    write_results_to_stdout(&matches)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the match report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(matches: &[RuleMatch]) -> Result<()> {
    let mut output = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(stdout().lock()));

    output.write_record(["transaction", "rule", "action", "priority"])?;

    for rule_match in matches {
        output.serialize(rule_match)?;
    }

    output.flush()?;

    Ok(())
}

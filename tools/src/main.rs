//! risk-runner: headless query runner for the riskwatch engine.
//!
//! Usage:
//!   risk-runner --db feeds.db --range 24h
//!   risk-runner --db :memory: --seed 42 --range 24h --pretty
//!   risk-runner --fixture feeds.json --range 7d

use anyhow::{Context, Result};
use riskwatch_core::{
    EngineConfig, FeedSource, MemoryFeed, RiskEngine, RiskQuery, RiskQueryResult, SqliteFeed,
    SystemClock, TimeRange,
};
use std::env;
use std::str::FromStr;
use std::time::Instant;

mod seed;

#[derive(serde::Serialize)]
struct Criteria {
    min_metric_a: u32,
    min_metric_b: u32,
    max_metric_c: f64,
}

#[derive(serde::Serialize)]
struct RunnerOutput {
    status: &'static str,
    query_time_ms: u128,
    criteria: Criteria,
    #[serde(flatten)]
    result: RiskQueryResult,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let range = string_arg(&args, "--range").unwrap_or_else(|| "24h".to_string());
    let query = RiskQuery {
        time_range: TimeRange::parse(&range)?,
        min_metric_a: parse_arg(&args, "--min-a", 1u32),
        min_metric_b: parse_arg(&args, "--min-b", 1u32),
        max_metric_c: parse_arg(&args, "--max-c", 0.0f64),
    };
    let pretty = args.iter().any(|a| a == "--pretty");

    let feed: Box<dyn FeedSource> = match string_arg(&args, "--fixture") {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading fixture {path}"))?;
            Box::new(MemoryFeed::from_json_str(&json)?)
        }
        None => {
            let db = string_arg(&args, "--db").unwrap_or_else(|| ":memory:".to_string());
            let store = SqliteFeed::open(&db)?;
            store.migrate()?;
            if args.iter().any(|a| a == "--seed") {
                let spec = seed::SeedSpec {
                    seed: parse_arg(&args, "--seed", 42u64),
                    accounts: parse_arg(&args, "--accounts", 1000usize),
                    logins: parse_arg(&args, "--logins", 10_000usize),
                    transactions: parse_arg(&args, "--transactions", 20_000usize),
                };
                seed::seed_demo_data(&store, &spec, chrono::Utc::now())?;
                log::info!(
                    "seeded {} transactions into {db}",
                    store.transaction_count()?
                );
            }
            Box::new(store)
        }
    };

    let engine = RiskEngine::new(EngineConfig::default(), feed, Box::new(SystemClock));

    let started = Instant::now();
    let result = engine.run(&query)?;
    let output = RunnerOutput {
        status: "success",
        query_time_ms: started.elapsed().as_millis(),
        criteria: Criteria {
            min_metric_a: query.min_metric_a,
            min_metric_b: query.min_metric_b,
            max_metric_c: query.max_metric_c,
        },
        result,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");

    Ok(())
}

fn parse_arg<T: FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

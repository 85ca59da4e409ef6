#![doc = include_str!("../README.md")]

mod config;

use clap::Parser;
use config::{CliArgs, RunConfig};
use futures::TryStreamExt;
use primefan::{EngineConfig, run};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = RunConfig::try_from(args)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let engine = EngineConfig::new(config.max_num, config.max_workers)
        .with_sink_capacity(config.sink_capacity);
    let workers = engine.worker_count();

    tracing::info!(
        "Enumerating primes up to {} with {workers} workers (sink capacity {})",
        config.max_num,
        config.sink_capacity
    );

    let start = Instant::now();
    let mut primes: Vec<u64> = run(engine)?.try_collect().await?;
    let elapsed = start.elapsed();

    if config.sorted {
        primes.sort_unstable();
    }

    let rate = primes.len() as f64 / elapsed.as_secs_f64();
    tracing::info!(
        "Found {} primes in {:.3}s ({rate:.0} primes/s)",
        primes.len(),
        elapsed.as_secs_f64()
    );

    if config.print {
        for prime in &primes {
            println!("{prime}");
        }
    } else {
        println!("{}", primes.len());
    }

    Ok(())
}

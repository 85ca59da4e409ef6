use anyhow::bail;
use clap::Parser;

/// Runtime configuration for the `primefan` binary.
///
/// All values are parsed from CLI arguments or environment variables, with
/// defaults suitable for a quick local run.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "primefan",
    version,
    about = "Enumerates primes with a concurrent trial-division worker pool"
)]
pub struct CliArgs {
    /// Inclusive upper bound of the search range.
    ///
    /// Environment variable: `MAX_NUM`
    #[arg(long, env = "MAX_NUM", default_value_t = 1_000_000)]
    pub max_num: u64,

    /// Cap on the number of concurrent workers.
    ///
    /// Defaults to the number of logical CPUs. The engine never spawns more
    /// than `⌊√max_num⌋` workers regardless of this cap.
    ///
    /// Environment variable: `MAX_WORKERS`
    #[arg(long, env = "MAX_WORKERS")]
    pub max_workers: Option<usize>,

    /// Capacity of the prime channel between the workers and this process.
    ///
    /// Lower values increase backpressure responsiveness; higher values
    /// enable deeper pipelining at the cost of memory.
    ///
    /// Environment variable: `SINK_CAPACITY`
    #[arg(long, env = "SINK_CAPACITY", default_value_t = 1024)]
    pub sink_capacity: usize,

    /// Sort the primes before reporting. The engine emits them in
    /// completion order, which is not numeric order.
    #[arg(long, default_value_t = false)]
    pub sorted: bool,

    /// Print every prime (one per line) instead of just the count.
    #[arg(short, long, default_value_t = false)]
    pub print: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub max_num: u64,
    pub max_workers: usize,
    pub sink_capacity: usize,
    pub sorted: bool,
    pub print: bool,
}

impl TryFrom<CliArgs> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.max_num < 2 {
            bail!("MAX_NUM must be at least 2");
        }

        let max_workers = args.max_workers.unwrap_or_else(num_cpus::get);
        if max_workers == 0 {
            bail!("MAX_WORKERS must be greater than 0");
        }

        if args.sink_capacity == 0 {
            bail!("SINK_CAPACITY must be greater than 0");
        }

        Ok(Self {
            max_num: args.max_num,
            max_workers,
            sink_capacity: args.sink_capacity,
            sorted: args.sorted,
            print: args.print,
        })
    }
}

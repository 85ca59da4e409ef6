//! Orchestration: configuration, worker sizing, and run wiring.
//!
//! A run spawns a fixed pool of worker tasks sharing one [`SharedCursor`]
//! and one result sink, and hands the sink's consumer side back as a
//! [`PrimeStream`]. All coordination (exhaustion detection, single close,
//! cancellation fan-out) lives in the cursor, sink, and worker modules;
//! this module only sizes and wires them.

use crate::{
    cursor::SharedCursor,
    error::{Error, Result},
    primality::{PrimalityTest, TrialDivision},
    sink::{self, PrimeStream},
    worker::worker_loop,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Tunable parameters for a single engine run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Inclusive upper bound of the search range. Must be ≥ 2.
    pub max_num: u64,

    /// Cap on the number of spawned workers. Must be ≥ 1.
    ///
    /// The effective count is `clamp(⌊√max_num⌋, 1, max_workers)`: the
    /// heaviest candidates near `max_num` dominate wall time, so workers
    /// beyond `√max_num` buy nothing.
    pub max_workers: usize,

    /// Capacity of the prime channel between workers and the consumer.
    /// Must be ≥ 1.
    ///
    /// Bounded on purpose: a slow consumer blocks producers instead of
    /// growing an unbounded in-flight buffer. Larger values trade memory
    /// for deeper pipelining. Runtimes differ wildly in how bounded
    /// capacity interacts with scheduling, so benchmark before tuning.
    pub sink_capacity: usize,
}

impl EngineConfig {
    /// Default capacity of the worker → consumer channel.
    pub const DEFAULT_SINK_CAPACITY: usize = 1024;

    /// Creates a config with the default sink capacity.
    pub const fn new(max_num: u64, max_workers: usize) -> Self {
        Self {
            max_num,
            max_workers,
            sink_capacity: Self::DEFAULT_SINK_CAPACITY,
        }
    }

    /// Overrides the sink capacity.
    #[must_use]
    pub const fn with_sink_capacity(mut self, sink_capacity: usize) -> Self {
        self.sink_capacity = sink_capacity;
        self
    }

    /// The number of workers a run with this config spawns:
    /// `clamp(⌊√max_num⌋, 1, max_workers)`.
    pub fn worker_count(&self) -> usize {
        usize::try_from(self.max_num.isqrt())
            .unwrap_or(usize::MAX)
            .clamp(1, self.max_workers.max(1))
    }

    fn validate(&self) -> Result<()> {
        if self.max_num < 2 {
            return Err(Error::InvalidConfig {
                reason: format!("max_num must be at least 2, got {}", self.max_num),
            });
        }
        if self.max_workers == 0 {
            return Err(Error::InvalidConfig {
                reason: "max_workers must be greater than 0".to_string(),
            });
        }
        if self.sink_capacity == 0 {
            return Err(Error::InvalidConfig {
                reason: "sink_capacity must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Enumerates all primes in `[2, config.max_num]` with a pool of concurrent
/// trial-division workers.
///
/// Returns a lazy, single-pass, non-restartable stream of primes. Primes
/// arrive **unordered**: candidates are dispatched in increasing order but
/// workers finish out of order, so only the set of yielded primes is
/// deterministic. Sort after draining if order matters.
///
/// The stream ends cleanly when every candidate has been checked, or yields
/// exactly one `Err` if a worker faulted. Dropping the stream early cancels
/// the remaining workers.
///
/// Must be called within a Tokio runtime; workers are spawned onto it.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if the configuration is out of range.
pub fn run(config: EngineConfig) -> Result<PrimeStream> {
    run_with(config, TrialDivision)
}

/// [`run`] with a caller-supplied [`PrimalityTest`].
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if the configuration is out of range.
pub fn run_with<P: PrimalityTest>(config: EngineConfig, checker: P) -> Result<PrimeStream> {
    config.validate()?;

    let worker_count = config.worker_count();
    let cursor = Arc::new(SharedCursor::new(config.max_num));
    let checker = Arc::new(checker);
    let token = CancellationToken::new();
    let (sink, stream) = sink::channel(config.sink_capacity, token.clone());

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Starting run: max_num={}, workers={worker_count}, sink_capacity={}",
        config.max_num,
        config.sink_capacity
    );

    for worker_id in 0..worker_count {
        tokio::spawn(worker_loop(
            worker_id,
            Arc::clone(&cursor),
            Arc::clone(&checker),
            sink.clone(),
            token.clone(),
        ));
    }

    // The local sink handle drops here: the channel terminates as soon as
    // the last worker exits.
    Ok(stream)
}

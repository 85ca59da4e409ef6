//! Error types for the prime engine.
//!
//! This module defines the central `Error` enum, which captures every
//! reportable failure of a run. A worker fault is forwarded through the
//! result sink, so the type is `Clone`.
//!
//! ## Error Cases
//! - `CheckFailed`: A primality check faulted; the run is aborted and the
//!   fault surfaces once on the output stream.
//! - `InvalidConfig`: The run configuration was rejected up front.
//! - `Cancelled`: The run was torn down before completing, either because a
//!   sibling worker faulted or because the consumer dropped the stream.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for engine runs.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// A primality check faulted on `candidate`.
    ///
    /// Faults are never retried: the check is pure, so a repeat would fail
    /// identically. The whole run is cancelled instead.
    #[error("primality check failed for candidate {candidate}: {reason}")]
    CheckFailed { candidate: u64, reason: String },

    /// The run configuration was out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The run was cancelled before completing.
    #[error("run cancelled")]
    Cancelled,
}

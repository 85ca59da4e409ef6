use crate::error::Result;

/// Primality oracle run by each worker on its own stack.
///
/// Implementations must not share mutable state: the check is the CPU-bound
/// unit of work that motivates parallelism, and it runs without any
/// synchronization. The engine is generic over this trait so tests can
/// inject a faulting implementation and exercise group cancellation.
pub trait PrimalityTest: Send + Sync + 'static {
    /// Decides whether `candidate` is prime.
    ///
    /// # Errors
    ///
    /// Any error is treated as a worker fault: the run is cancelled and the
    /// fault surfaces exactly once on the output stream. Faults are never
    /// retried.
    fn is_prime(&self, candidate: u64) -> Result<bool>;
}

/// Trial division limited to `⌊√candidate⌋`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialDivision;

impl PrimalityTest for TrialDivision {
    fn is_prime(&self, candidate: u64) -> Result<bool> {
        Ok(trial_division(candidate))
    }
}

/// Returns true iff `candidate` has no divisor in `[2, ⌊√candidate⌋]`.
///
/// Callers are expected to pass members of the candidate domain (≥ 2).
pub fn trial_division(candidate: u64) -> bool {
    debug_assert!(candidate >= 2);
    let limit = candidate.isqrt();
    (2..=limit).all(|divisor| candidate % divisor != 0)
}

use crate::{
    cursor::{SharedCursor, TakeNext},
    primality::PrimalityTest,
    sink::PrimeSink,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Worker task: pulls candidates from the shared cursor, tests them, and
/// forwards primes to the result sink.
///
/// Designed to be spawned as a Tokio task. The loop runs until one of its
/// terminal states:
///
/// - **exhausted** — the cursor ran out of candidates (normal completion);
/// - **cancelled** — a sibling faulted or the consumer dropped the stream;
/// - **failed** — this worker's own primality check faulted, which claims
///   the error-close and broadcasts cancellation to the siblings.
///
/// Cancellation is cooperative: it is observed at the top of the loop and
/// inside the sink send, never mid-computation.
#[allow(clippy::used_underscore_binding)]
pub(crate) async fn worker_loop<P: PrimalityTest>(
    _worker_id: usize,
    cursor: Arc<SharedCursor>,
    checker: Arc<P>,
    sink: PrimeSink,
    token: CancellationToken,
) {
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {_worker_id} started");

    loop {
        if token.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::trace!("Worker {_worker_id} cancelled");
            return;
        }

        let candidate = match cursor.take_next() {
            TakeNext::Candidate(candidate) => candidate,
            TakeNext::Exhausted => {
                // The worker holding the last candidate may have finished
                // before anyone observed exhaustion, so the completion check
                // also runs here.
                try_close_clean(&cursor, &sink, _worker_id);
                #[cfg(feature = "tracing")]
                tracing::trace!("Worker {_worker_id} exhausted");
                return;
            }
        };

        match checker.is_prime(candidate) {
            Ok(true) => {
                if sink.send(candidate).await.is_err() {
                    // Cancelled mid-send. The candidate stays unchecked; the
                    // counters only need to converge on clean runs.
                    return;
                }
            }
            Ok(false) => {}
            Err(fault) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Worker {_worker_id} faulted on candidate {candidate}: {fault}");
                sink.close_with_fault(fault).await;
                return;
            }
        }

        if cursor.record_checked().is_complete() {
            // Redundant across workers at the boundary; the CAS inside the
            // sink makes the close effectively-once.
            let _won = sink.close_clean();
            #[cfg(feature = "tracing")]
            if _won {
                tracing::debug!("Worker {_worker_id} closed the sink");
            }
        }
    }
}

#[allow(clippy::used_underscore_binding)]
fn try_close_clean(cursor: &SharedCursor, sink: &PrimeSink, _worker_id: usize) {
    if cursor.progress().is_complete() {
        let _won = sink.close_clean();
        #[cfg(feature = "tracing")]
        if _won {
            tracing::debug!("Worker {_worker_id} closed the sink");
        }
    }
}

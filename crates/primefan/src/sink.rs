use crate::error::{Error, Result};
use core::pin::Pin;
use core::task::{Context, Poll};
use portable_atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::{Stream, wrappers::ReceiverStream};
use tokio_util::sync::CancellationToken;

/// Creates a result sink and its consumer-facing stream.
///
/// The channel is capacity-bounded on purpose: a consumer slower than the
/// workers blocks producers at [`PrimeSink::send`] instead of growing an
/// unbounded in-flight buffer. The `token` is the run's cancellation
/// broadcast, shared with every worker.
pub(crate) fn channel(capacity: usize, token: CancellationToken) -> (PrimeSink, PrimeStream) {
    let (tx, rx) = mpsc::channel(capacity);
    let sink = PrimeSink {
        tx,
        closed: Arc::new(AtomicBool::new(false)),
        token,
    };
    let stream = PrimeStream {
        inner: ReceiverStream::new(rx),
        done: false,
    };
    (sink, stream)
}

/// Producer handle to the result sink, cloned into every worker.
///
/// The sink has exactly two terminal states: closed-clean (all producers
/// finished normally) and closed-error (a producer faulted). Claiming the
/// transition goes through one compare-and-set on a shared flag, so workers
/// racing at the completion boundary close it effectively once; losing
/// claims are silent no-ops.
#[derive(Clone)]
pub(crate) struct PrimeSink {
    tx: mpsc::Sender<Result<u64>>,
    closed: Arc<AtomicBool>,
    token: CancellationToken,
}

impl PrimeSink {
    /// Sends one prime to the consumer, blocking while the channel is full.
    ///
    /// This is the system's backpressure point. The send races the
    /// cancellation token, so a worker never completes a send after a
    /// sibling faulted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the run was cancelled or the consumer
    /// dropped the stream. A dropped consumer also cancels the token so the
    /// remaining workers stop computing.
    pub(crate) async fn send(&self, prime: u64) -> Result<()> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Error::Cancelled),
            res = self.tx.send(Ok(prime)) => {
                if res.is_err() {
                    self.token.cancel();
                    return Err(Error::Cancelled);
                }
                Ok(())
            }
        }
    }

    /// Claims the clean-close transition.
    ///
    /// Returns true for exactly one caller per run; every other claim is a
    /// no-op. The channel itself terminates once the last worker drops its
    /// handle, which happens promptly because completion implies the cursor
    /// is exhausted.
    pub(crate) fn close_clean(&self) -> bool {
        self.claim_close()
    }

    /// Claims the error-close transition, broadcasting cancellation and
    /// forwarding the fault to the consumer.
    ///
    /// The token is cancelled before the fault is forwarded: issuing the
    /// broadcast never waits on the consumer or on any sibling worker. The
    /// forward itself is best effort; the consumer may already be gone.
    pub(crate) async fn close_with_fault(&self, fault: Error) -> bool {
        if !self.claim_close() {
            return false;
        }
        self.token.cancel();
        let _ = self.tx.send(Err(fault)).await;
        true
    }

    fn claim_close(&self) -> bool {
        self.closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Consumer-facing view of a run's output: a lazy, single-pass stream of
/// primes in `[2, max_num]`.
///
/// Primes are **not** emitted in increasing order — workers finish out of
/// order — only the set is deterministic. The stream ends cleanly after a
/// successful run; a faulted run yields exactly one `Err` and then ends,
/// even if stray primes were still in flight behind it.
#[derive(Debug)]
pub struct PrimeStream {
    inner: ReceiverStream<Result<u64>>,
    done: bool,
}

impl Stream for PrimeStream {
    type Item = Result<u64>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        let next = core::task::ready!(Pin::new(&mut this.inner).poll_next(cx));
        if matches!(next, Some(Err(_)) | None) {
            this.done = true;
        }
        Poll::Ready(next)
    }
}

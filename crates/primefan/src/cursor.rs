use crate::candidates::Candidates;
use parking_lot::Mutex;
use portable_atomic::{AtomicBool, AtomicU64, Ordering};

/// Outcome of a single [`SharedCursor::take_next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeNext {
    /// A candidate was taken. It belongs to this caller alone: no other
    /// caller will ever receive it.
    Candidate(u64),
    /// The domain is empty. Permanent: every later call reports this too.
    Exhausted,
}

/// Snapshot of run progress, used by the completion check.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Candidates successfully taken from the cursor.
    pub dispatched: u64,
    /// Candidates whose primality check has finished (prime or not).
    /// Always ≤ `dispatched`; converges to equality on a clean run.
    pub checked: u64,
    /// Whether the cursor has reported exhaustion.
    pub exhausted: bool,
}

impl Progress {
    /// The terminal condition for a clean run: the cursor is exhausted and
    /// every dispatched candidate has been checked. There is no static work
    /// count up front, so completion is derived from these dynamic counters.
    pub const fn is_complete(&self) -> bool {
        self.exhausted && self.checked == self.dispatched
    }
}

/// Synchronized position tracker over the candidate domain, shared by all
/// workers of a run.
///
/// This is the only mutable state shared across workers (besides the sink's
/// close flag): the domain position plus both run counters live behind one
/// abstraction with exactly two mutating operations, [`take_next`] and
/// [`record_checked`].
///
/// `take_next` advances and reads under a single critical section rather
/// than a check-then-act pair: a "has more" check observed by one caller
/// could otherwise be invalidated by another caller between check and take.
///
/// [`take_next`]: SharedCursor::take_next
/// [`record_checked`]: SharedCursor::record_checked
pub struct SharedCursor {
    domain: Mutex<Candidates>,
    exhausted: AtomicBool,
    dispatched: AtomicU64,
    checked: AtomicU64,
}

impl SharedCursor {
    /// Creates a cursor over `{2} ∪ {3, 5, ..., max_num}`.
    pub fn new(max_num: u64) -> Self {
        Self {
            domain: Mutex::new(Candidates::new(max_num)),
            exhausted: AtomicBool::new(false),
            dispatched: AtomicU64::new(0),
            checked: AtomicU64::new(0),
        }
    }

    /// Takes the next candidate, or reports exhaustion.
    ///
    /// Safe under concurrent invocation: each candidate is yielded to
    /// exactly one caller, ever, and no candidate in range is skipped. Once
    /// exhausted, all subsequent calls report [`TakeNext::Exhausted`].
    pub fn take_next(&self) -> TakeNext {
        let mut domain = self.domain.lock();
        match domain.next() {
            Some(candidate) => {
                // Incremented while holding the lock, so the count is frozen
                // by the time any caller observes exhaustion.
                self.dispatched.fetch_add(1, Ordering::Relaxed);
                TakeNext::Candidate(candidate)
            }
            None => {
                self.exhausted.store(true, Ordering::Release);
                TakeNext::Exhausted
            }
        }
    }

    /// Records that one candidate's primality check finished and returns the
    /// resulting progress snapshot.
    ///
    /// Called exactly once per taken candidate. The caller runs the
    /// completion check on the returned snapshot.
    pub fn record_checked(&self) -> Progress {
        let checked = self.checked.fetch_add(1, Ordering::AcqRel) + 1;
        Progress {
            exhausted: self.exhausted.load(Ordering::Acquire),
            dispatched: self.dispatched.load(Ordering::Acquire),
            checked,
        }
    }

    /// Returns the current progress snapshot without recording anything.
    pub fn progress(&self) -> Progress {
        Progress {
            exhausted: self.exhausted.load(Ordering::Acquire),
            dispatched: self.dispatched.load(Ordering::Acquire),
            checked: self.checked.load(Ordering::Acquire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SharedCursor, TakeNext};

    fn drain(cursor: &SharedCursor) -> Vec<u64> {
        let mut taken = Vec::new();
        while let TakeNext::Candidate(c) = cursor.take_next() {
            taken.push(c);
        }
        taken
    }

    #[test]
    fn yields_the_full_domain_in_order() {
        let cursor = SharedCursor::new(11);
        assert_eq!(drain(&cursor), vec![2, 3, 5, 7, 9, 11]);
    }

    #[test]
    fn exhaustion_is_permanent() {
        let cursor = SharedCursor::new(11);
        let taken = drain(&cursor);
        for _ in 0..10 {
            assert_eq!(cursor.take_next(), TakeNext::Exhausted);
        }
        // No candidate was re-issued after exhaustion.
        assert_eq!(cursor.progress().dispatched, taken.len() as u64);
        assert!(cursor.progress().exhausted);
    }

    #[test]
    fn counters_track_takes_and_checks() {
        let cursor = SharedCursor::new(7);
        assert!(matches!(cursor.take_next(), TakeNext::Candidate(2)));
        assert!(matches!(cursor.take_next(), TakeNext::Candidate(3)));

        let progress = cursor.record_checked();
        assert_eq!(progress.dispatched, 2);
        assert_eq!(progress.checked, 1);
        assert!(!progress.is_complete());

        let progress = cursor.record_checked();
        assert_eq!(progress.checked, 2);
        // Checked equals dispatched, but the domain still holds candidates.
        assert!(!progress.is_complete());
    }

    #[test]
    fn complete_only_when_exhausted_and_converged() {
        let cursor = SharedCursor::new(3);
        assert!(matches!(cursor.take_next(), TakeNext::Candidate(2)));
        assert!(matches!(cursor.take_next(), TakeNext::Candidate(3)));
        assert_eq!(cursor.take_next(), TakeNext::Exhausted);

        assert!(!cursor.record_checked().is_complete());
        assert!(cursor.record_checked().is_complete());
    }

    #[test]
    fn concurrent_takes_never_duplicate_or_skip() {
        use std::collections::HashSet;
        use std::sync::Arc;
        use std::thread::scope;

        const THREADS: usize = 8;
        const MAX_NUM: u64 = 10_001;

        let cursor = Arc::new(SharedCursor::new(MAX_NUM));
        let mut per_thread: Vec<Vec<u64>> = Vec::new();

        scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let cursor = Arc::clone(&cursor);
                    s.spawn(move || {
                        let mut taken = Vec::new();
                        while let TakeNext::Candidate(c) = cursor.take_next() {
                            taken.push(c);
                        }
                        taken
                    })
                })
                .collect();
            for handle in handles {
                per_thread.push(handle.join().unwrap());
            }
        });

        let mut seen = HashSet::new();
        for taken in &per_thread {
            for &c in taken {
                assert!(seen.insert(c), "candidate {c} issued twice");
            }
        }

        let expected: HashSet<u64> = crate::candidates::Candidates::new(MAX_NUM).collect();
        assert_eq!(seen, expected);
        assert_eq!(cursor.progress().dispatched, expected.len() as u64);
    }
}

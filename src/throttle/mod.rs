//! Per-document throttled lint scheduling
//!
//! A coalescing debounce: each document gets at most one in-flight lint
//! invocation and at most one pending (queued) invocation at any time.
//! Triggers arriving while work is scheduled replace the scheduled job
//! and re-arm the timer; triggers arriving while work is running park
//! the job in a single pending slot, last writer wins. When the
//! in-flight job completes, the pending job (if any) is scheduled next.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tower_lsp::lsp_types::Url;

/// A unit of lint work. Executed at most once.
pub type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

enum Phase {
    /// Debounce timer armed; the job runs when it expires
    Scheduled { job: Job, delay: Duration },
    /// Job running; the newest superseding trigger waits in `pending`
    Running { pending: Option<(Job, Duration)> },
}

struct DocState {
    /// Identifies the currently armed timer; expirations carrying an
    /// older epoch are stale and ignored
    epoch: u64,
    phase: Phase,
}

/// Schedules lint invocations per document, coalescing bursts of
/// triggers into single executions.
pub struct ThrottledInvoker {
    docs: Arc<DashMap<Url, DocState>>,
    epochs: AtomicU64,
}

impl ThrottledInvoker {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            docs: Arc::new(DashMap::new()),
            epochs: AtomicU64::new(0),
        }
    }

    fn next_epoch(&self) -> u64 {
        self.epochs.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Request a lint for `uri`. Never blocks; `job` is either executed
    /// once (after at most `delay` plus any in-flight run) or replaced
    /// by a newer trigger before it started.
    pub fn trigger(self: &Arc<Self>, uri: Url, delay: Duration, job: Job) {
        let epoch = self.next_epoch();
        let mut armed = false;

        match self.docs.entry(uri.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(DocState {
                    epoch,
                    phase: Phase::Scheduled { job, delay },
                });
                armed = true;
            }
            Entry::Occupied(mut entry) => {
                let state = entry.get_mut();
                match &mut state.phase {
                    Phase::Scheduled { .. } => {
                        state.epoch = epoch;
                        state.phase = Phase::Scheduled { job, delay };
                        armed = true;
                    }
                    Phase::Running { pending } => {
                        *pending = Some((job, delay));
                    }
                }
            }
        }

        if armed {
            self.arm_timer(uri, epoch, delay);
        }
    }

    /// Discard all scheduler state for `uri`. Any in-flight run keeps
    /// going but its completion (and any pending job) becomes a no-op.
    pub fn remove(&self, uri: &Url) {
        self.docs.remove(uri);
    }

    /// Discard scheduler state for every document.
    pub fn clear(&self) {
        self.docs.clear();
    }

    fn arm_timer(self: &Arc<Self>, uri: Url, epoch: u64, delay: Duration) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            this.fire(uri, epoch).await;
        });
    }

    /// Timer expiry: promote the scheduled job to running, execute it,
    /// then schedule whatever trigger arrived in the meantime.
    async fn fire(self: Arc<Self>, uri: Url, epoch: u64) {
        let job = {
            let Some(mut state) = self.docs.get_mut(&uri) else {
                return;
            };
            if state.epoch != epoch {
                return;
            }
            match std::mem::replace(&mut state.phase, Phase::Running { pending: None }) {
                Phase::Scheduled { job, .. } => job,
                running => {
                    state.phase = running;
                    return;
                }
            }
        };

        job.await;

        let rearm = match self.docs.entry(uri.clone()) {
            // Closed during flight; nothing to re-arm
            Entry::Vacant(_) => return,
            Entry::Occupied(mut entry) => {
                // A close/reopen raced the completion; the entry belongs
                // to a newer generation now
                if entry.get().epoch != epoch {
                    return;
                }
                let parked = match &mut entry.get_mut().phase {
                    Phase::Running { pending } => pending.take(),
                    Phase::Scheduled { .. } => return,
                };
                match parked {
                    Some((job, delay)) => {
                        let state = entry.get_mut();
                        let epoch = self.next_epoch();
                        state.epoch = epoch;
                        state.phase = Phase::Scheduled { job, delay };
                        Some((epoch, delay))
                    }
                    None => {
                        entry.remove();
                        None
                    }
                }
            }
        };

        if let Some((epoch, delay)) = rearm {
            self.arm_timer(uri, epoch, delay);
        }
    }
}

impl Default for ThrottledInvoker {
    fn default() -> Self {
        Self::new()
    }
}

// src/engine/dispatch.rs
// =============================================================================
// The dispatcher and the completion barrier.
//
// How a run works:
// 1. Dispatching: read the input one line at a time. For each non-empty line,
//    wait for a free slot, then spawn a worker into a JoinSet. Waiting for the
//    slot BEFORE spawning keeps at most `limit` workers alive at once. While
//    waiting, finished workers are joined so they don't accumulate.
// 2. Draining: the input is exhausted. Join every worker still in the set.
// 3. Done: no worker can touch the tally any more, so read it once.
//
// The JoinSet is the barrier: it owns every spawned task, and if it is ever
// dropped early it aborts whatever is still running, so no task outlives run().
// =============================================================================

use super::limiter::Limiter;
use super::tally::Tally;
use super::worker::{run_task, TaskContext};
use crate::config::Config;
use crate::fetch::Fetch;
use crate::report::{Report, RunSummary, TaskReport};
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Dispatching,
    Draining,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Dispatching => "dispatching",
            Phase::Draining => "draining",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Runs fetch-and-count tasks over an input with a fixed concurrency limit.
pub struct Engine {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetch>,
    report: Arc<dyn Report>,
    limiter: Limiter,
    keep_reports: bool,
}

impl Engine {
    pub fn new(config: Config, fetcher: Arc<dyn Fetch>, report: Arc<dyn Report>) -> Self {
        let limiter = Limiter::new(config.concurrency_limit());
        Self {
            config: Arc::new(config),
            fetcher,
            report,
            limiter,
            keep_reports: false,
        }
    }

    /// Keep every TaskReport in the summary (needed for --json). Off by
    /// default so a long input only costs a few counters.
    pub fn keep_reports(mut self, keep: bool) -> Self {
        self.keep_reports = keep;
        self
    }

    /// Consumes the input and returns once every dispatched task has finished.
    ///
    /// Never fails: fetch errors are per task, and an I/O error on the input
    /// just ends the dispatch phase early.
    pub async fn run<R>(&self, mut input: R) -> RunSummary
    where
        R: AsyncBufRead + Unpin,
    {
        let mut phase = Phase::Idle;
        let tally = Arc::new(Tally::new());
        let mut workers: JoinSet<TaskReport> = JoinSet::new();
        let mut finished = Finished::new(self.keep_reports);
        let mut buf = Vec::new();

        transition(&mut phase, Phase::Dispatching);
        tracing::debug!(limit = self.limiter.capacity(), word = self.config.word(), "starting run");
        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read input, no more URLs will be dispatched");
                    break;
                }
            }

            // Bytes that aren't UTF-8 still make a task; the fetch reports them.
            let line = String::from_utf8_lossy(&buf);
            let url = line.trim();
            if url.is_empty() {
                continue;
            }

            // Reap finished workers while waiting for a slot, so completed
            // tasks don't pile up in the JoinSet for the whole run.
            let slot = loop {
                tokio::select! {
                    biased;
                    Some(joined) = workers.join_next(), if !workers.is_empty() => finished.record(joined),
                    acquired = self.limiter.acquire() => break acquired,
                }
            };
            let slot = match slot {
                Ok(slot) => slot,
                Err(e) => {
                    tracing::error!(error = %e, "concurrency limiter closed");
                    break;
                }
            };

            let ctx = TaskContext {
                config: Arc::clone(&self.config),
                fetcher: Arc::clone(&self.fetcher),
                report: Arc::clone(&self.report),
                tally: Arc::clone(&tally),
            };
            tracing::trace!(url, in_use = self.limiter.in_use(), "spawning worker");
            workers.spawn(run_task(url.to_string(), ctx, slot));
            finished.peak_pending = finished.peak_pending.max(workers.len());
        }

        transition(&mut phase, Phase::Draining);
        while let Some(joined) = workers.join_next().await {
            finished.record(joined);
        }

        let total = Tally::finish(tally).await;
        transition(&mut phase, Phase::Done);

        RunSummary {
            word: self.config.word().to_string(),
            case_sensitive: self.config.case_sensitive(),
            total,
            succeeded: finished.succeeded,
            failed: finished.failed,
            tasks: finished.reports,
            peak_pending: finished.peak_pending,
        }
    }
}

/// Bookkeeping for joined workers.
struct Finished {
    succeeded: usize,
    failed: usize,
    reports: Vec<TaskReport>,
    keep_reports: bool,
    peak_pending: usize,
}

impl Finished {
    fn new(keep_reports: bool) -> Self {
        Self {
            succeeded: 0,
            failed: 0,
            reports: Vec::new(),
            keep_reports,
            peak_pending: 0,
        }
    }

    fn record(&mut self, joined: Result<TaskReport, JoinError>) {
        match joined {
            Ok(report) => {
                if report.is_ok() {
                    self.succeeded += 1;
                } else {
                    self.failed += 1;
                }
                if self.keep_reports {
                    self.reports.push(report);
                }
            }
            // The slot was released while unwinding; the task adds nothing.
            Err(e) => {
                self.failed += 1;
                tracing::error!(error = %e, "worker task did not complete");
            }
        }
    }
}

fn transition(phase: &mut Phase, next: Phase) {
    tracing::debug!(from = %phase, to = %next, "run phase");
    *phase = next;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a JoinSet?
//    - A collection of spawned tasks owned by one place
//    - join_next() waits for whichever task finishes first
//    - Dropping the set aborts every task still in it
//    - It plays the role of a wait group, with results attached
//
// 2. Why acquire the slot before spawning?
//    - If we spawned first, every line would become a task immediately and the
//      tasks would queue on the semaphore; memory would grow with the input
//    - Acquiring first makes the dispatch loop itself wait, so the input is
//      only read as fast as workers free up
//
// 3. Why Arc::clone(&x) instead of x.clone()?
//    - Both do the same thing
//    - Arc::clone makes it obvious we copy a pointer, not the data
// -----------------------------------------------------------------------------

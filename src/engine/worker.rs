// src/engine/worker.rs
// =============================================================================
// One fetch-and-count task.
//
// Lifecycle of a worker:
//   Acquired   the dispatcher already holds a Slot for us
//   Fetching   ask the Fetch implementation for the body
//   Counting   read the body line by line, count the word in each line
//   Reporting  exactly one line: a count or an error
//   Released   add to the tally, drop the body, drop the slot
//
// A failed fetch is NOT an error for the run: it is reported, contributes
// zero, and the worker still goes through the same release steps.
// =============================================================================

use super::limiter::Slot;
use super::tally::Tally;
use crate::config::Config;
use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::report::{Outcome, Report, TaskReport};
use futures::io::{AsyncBufRead, AsyncBufReadExt};
use std::sync::Arc;

/// Shared handles every worker needs. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct TaskContext {
    pub config: Arc<Config>,
    pub fetcher: Arc<dyn Fetch>,
    pub report: Arc<dyn Report>,
    pub tally: Arc<Tally>,
}

/// Runs one task to completion and returns what happened.
///
/// The slot is moved in so that it lives exactly as long as this task.
pub async fn run_task(url: String, ctx: TaskContext, slot: Slot) -> TaskReport {
    let outcome = match fetch_and_count(ctx.fetcher.as_ref(), &url, &ctx.config).await {
        Ok(count) => {
            tracing::debug!(%url, count, "counted");
            Outcome::Counted { count }
        }
        Err(e) => {
            tracing::debug!(%url, error = %e, "fetch failed");
            Outcome::Failed {
                error: e.to_string(),
            }
        }
    };

    let report = TaskReport { url, outcome };
    ctx.report.task(&report);
    ctx.tally.add(report.count()).await;

    drop(slot);
    report
}

/// Fetches one URL and counts the word across all lines of its body.
///
/// The body is owned by this scope and dropped on every return path, which
/// closes the connection (or hands it back to the pool).
pub async fn fetch_and_count(fetcher: &dyn Fetch, url: &str, config: &Config) -> Result<u64, FetchError> {
    let mut body = fetcher.fetch(url).await?;
    count_lines(&mut body, config).await
}

/// Counts the word line by line. Matches never span a line break.
pub async fn count_lines<R>(body: &mut R, config: &Config) -> Result<u64, FetchError>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let mut total = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = body.read_until(b'\n', &mut buf).await?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(trim_line_end(&buf));
        total += config.count_in_line(&line);
    }

    Ok(total)
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// src/report.rs
// =============================================================================
// Everything the user sees on stdout.
//
// Text mode prints one line per task as it completes:
//   Count for <url>: <n>
//   Can't get <url>: <error>
// and finally:
//   Total: <n>
//
// JSON mode stays silent while tasks run and prints one RunSummary document at
// the end.
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Counted { count: u64 },
    Failed { error: String },
}

/// The result of one fetch-and-count task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReport {
    pub url: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl TaskReport {
    /// Contribution of this task to the total (failures contribute zero).
    pub fn count(&self) -> u64 {
        match self.outcome {
            Outcome::Counted { count } => count,
            Outcome::Failed { .. } => 0,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Counted { .. })
    }
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Counted { count } => write!(f, "Count for {}: {}", self.url, count),
            Outcome::Failed { error } => write!(f, "Can't get {}: {}", self.url, error),
        }
    }
}

/// Everything known once the run is Done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub word: String,
    pub case_sensitive: bool,
    pub total: u64,
    pub succeeded: usize,
    pub failed: usize,
    /// Per-task results; empty unless the engine was asked to keep them.
    pub tasks: Vec<TaskReport>,
    /// Most spawned tasks the barrier was holding at once.
    #[serde(skip)]
    pub peak_pending: usize,
}

/// Sink for per-task lines, called by each worker as it finishes.
///
/// Must be safe to call from many tasks at once.
pub trait Report: Send + Sync {
    fn task(&self, report: &TaskReport);
}

/// Prints each task line on stdout immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Report for Console {
    fn task(&self, report: &TaskReport) {
        // println! locks stdout per call, so lines from parallel workers never interleave
        println!("{}", report);
    }
}

/// Swallows per-task lines (JSON mode prints everything at the end).
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Report for Silent {
    fn task(&self, _report: &TaskReport) {}
}

pub fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        println!("Total: {}", summary.total);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod recorder {
    use super::*;
    use std::sync::Mutex;

    /// Collects the lines a Console would have printed.
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        lines: Mutex<Vec<String>>,
    }

    impl Recorder {
        pub(crate) fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Report for Recorder {
        fn task(&self, report: &TaskReport) {
            self.lines.lock().unwrap().push(report.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_lines() {
        let ok = TaskReport {
            url: "https://example.com".to_string(),
            outcome: Outcome::Counted { count: 3 },
        };
        assert_eq!(ok.to_string(), "Count for https://example.com: 3");
        assert_eq!(ok.count(), 3);
        assert!(ok.is_ok());

        let failed = TaskReport {
            url: "https://example.com".to_string(),
            outcome: Outcome::Failed {
                error: "connection refused".to_string(),
            },
        };
        assert_eq!(failed.to_string(), "Can't get https://example.com: connection refused");
        assert_eq!(failed.count(), 0);
        assert!(!failed.is_ok());
    }

    #[test]
    fn test_task_report_json_shape() {
        let report = TaskReport {
            url: "u1".to_string(),
            outcome: Outcome::Counted { count: 2 },
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "url": "u1", "status": "counted", "count": 2 })
        );
    }
}

//! Batch dispatcher: one independent job per URL, run concurrently.
//!
//! Jobs run on tokio's blocking pool because every step blocks on an external
//! process. They share nothing but the [`JobContext`] (read-only plus the
//! serialized console). Completion order is arbitrary and one job's failure
//! never affects another.

mod context;
mod job;

pub use context::JobContext;
pub use job::{run_job, JobOutcome};

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::input::Job;

/// Batch-wide knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// At most this many jobs in flight; `None` starts every job at once.
    pub max_parallel_jobs: Option<usize>,
}

/// Result of one batch. `outcomes` is in completion order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(Job, JobOutcome)>,
    /// URLs that appeared more than once; only the first occurrence ran.
    pub duplicates: Vec<String>,
}

impl BatchReport {
    pub fn failed(&self) -> impl Iterator<Item = (&Job, &str)> {
        self.outcomes.iter().filter_map(|(job, outcome)| match outcome {
            JobOutcome::Failed { reason } => Some((job, reason.as_str())),
            _ => None,
        })
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }
}

/// Splits off repeated URLs, keeping the first occurrence of each.
pub fn dedupe(jobs: Vec<Job>) -> (Vec<Job>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(jobs.len());
    let mut duplicates = Vec::new();
    for job in jobs {
        if seen.insert(job.url.clone()) {
            unique.push(job);
        } else {
            duplicates.push(job.url);
        }
    }
    (unique, duplicates)
}

/// Runs `jobs` concurrently and collects their outcomes.
///
/// Keeps up to `max_parallel_jobs` in flight (all of them if unset); when one
/// finishes the next is started until the list is exhausted.
pub async fn run_batch(ctx: Arc<JobContext>, jobs: Vec<Job>, opts: BatchOptions) -> BatchReport {
    let (jobs, duplicates) = dedupe(jobs);
    for url in &duplicates {
        ctx.console.line(format!("[SKIP] Duplicate URL: {url}"));
        tracing::info!(url = %url, "duplicate url skipped");
    }

    let max_in_flight = opts.max_parallel_jobs.unwrap_or(jobs.len()).max(1);
    let mut pending = jobs.into_iter();
    let mut join_set = JoinSet::new();
    let mut report = BatchReport {
        outcomes: Vec::new(),
        duplicates,
    };

    loop {
        while join_set.len() < max_in_flight {
            let Some(job) = pending.next() else {
                break;
            };
            let ctx = Arc::clone(&ctx);
            join_set.spawn_blocking(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| run_job(&ctx, &job)))
                    .unwrap_or_else(|payload| crashed(&ctx, &job, &*payload));
                (job, outcome)
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        match res {
            Ok(done) => report.outcomes.push(done),
            // Panics are caught inside the task; this is only cancellation.
            Err(e) => tracing::error!("job task join: {e}"),
        }
    }

    tracing::info!(
        completed = report.outcomes.len(),
        failed = report.failure_count(),
        "batch finished"
    );
    report
}

/// Outcome for a job whose thread panicked; siblings keep running.
fn crashed(ctx: &JobContext, job: &Job, payload: &(dyn Any + Send)) -> JobOutcome {
    let msg = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    let reason = format!("job crashed: {msg}");
    tracing::error!(url = %job.url, "{reason}");
    ctx.console.finish_progress();
    ctx.console.line(format!("[FAILED] {}: {reason}", job.url));
    JobOutcome::Failed { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_occurrence_in_order() {
        let jobs = vec![
            Job::new("https://a").with_size_hint("5M"),
            Job::new("https://b"),
            Job::new("https://a"),
            Job::new("https://c"),
            Job::new("https://b"),
        ];
        let (unique, dups) = dedupe(jobs);
        assert_eq!(
            unique,
            vec![
                Job::new("https://a").with_size_hint("5M"),
                Job::new("https://b"),
                Job::new("https://c"),
            ]
        );
        assert_eq!(dups, vec!["https://a".to_string(), "https://b".to_string()]);
    }

    #[test]
    fn report_counts_failures() {
        let report = BatchReport {
            outcomes: vec![
                (
                    Job::new("https://a"),
                    JobOutcome::Failed {
                        reason: "boom".into(),
                    },
                ),
                (
                    Job::new("https://b"),
                    JobOutcome::Downloaded {
                        path: "/dl/b.mp4".into(),
                        reencode: None,
                    },
                ),
            ],
            duplicates: Vec::new(),
        };
        assert_eq!(report.failure_count(), 1);
        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed[0].0.url, "https://a");
        assert_eq!(failed[0].1, "boom");
    }
}

//! Input modes. Each one turns its input into jobs and hands them to the dispatcher.

mod args;
mod from_file;
mod interactive;

pub use args::run_args;
pub use from_file::run_from_file;
pub use interactive::run_interactive;

use std::sync::Arc;
use vdl_core::dispatch::{self, BatchOptions, BatchReport, JobContext, JobOutcome};
use vdl_core::input::Job;

/// Runs one batch; `None` if Ctrl+C arrived first.
async fn execute(ctx: &Arc<JobContext>, jobs: Vec<Job>, opts: BatchOptions) -> Option<BatchReport> {
    tokio::select! {
        report = dispatch::run_batch(Arc::clone(ctx), jobs, opts) => Some(report),
        () = ctrl_c() => None,
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}

fn summarize(ctx: &JobContext, report: &BatchReport) {
    let failed = report.failure_count();
    let present = report
        .outcomes
        .iter()
        .filter(|(_, o)| matches!(o, JobOutcome::AlreadyPresent { .. }))
        .count();
    let downloaded = report.outcomes.len() - failed - present;
    ctx.console.line(format!(
        "[SUMMARY] {downloaded} downloaded, {present} already present, {failed} failed, {} duplicate(s)",
        report.duplicates.len()
    ));
}

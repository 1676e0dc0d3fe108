//! One job end to end: fetch, then re-encode when a size hint was given.

use std::path::PathBuf;

use super::JobContext;
use crate::fetch::{self, FetchOutcome};
use crate::input::Job;
use crate::reencode::{self, ReencodeOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Downloaded {
        path: PathBuf,
        /// `None` without a size hint or when re-encoding failed (reported separately).
        reencode: Option<ReencodeOutcome>,
    },
    AlreadyPresent {
        path: PathBuf,
        reencode: Option<ReencodeOutcome>,
    },
    Failed {
        reason: String,
    },
}

/// Runs `job` to completion on the current thread. Never panics on tool
/// failures; every problem ends up in the returned outcome and on the console.
pub fn run_job(ctx: &JobContext, job: &Job) -> JobOutcome {
    let console = &ctx.console;

    let fetched = match fetch::fetch(ctx, job) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(url = %job.url, "fetch failed: {e}");
            console.line(format!("[FAILED] {}: {e}", job.url));
            return JobOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    match &fetched {
        FetchOutcome::Downloaded(path) => {
            console.line(format!("Download completed. [{}]", job.url));
            tracing::info!(url = %job.url, path = %path.display(), "download completed");
        }
        FetchOutcome::AlreadyPresent(path) => {
            console.line(format!(
                "[SKIP] {} already exists, skipping download.",
                path.display()
            ));
        }
    }

    let reencode = job
        .size_hint
        .as_deref()
        .and_then(|hint| match reencode::reencode_file(ctx, fetched.path(), hint) {
            Ok(outcome) => {
                console.line(format!("{} {outcome}", outcome.tag()));
                tracing::info!(url = %job.url, ?outcome, "re-encode finished");
                Some(outcome)
            }
            Err(e) => {
                console.line(format!("[ERROR] re-encode of {} failed: {e}", job.url));
                tracing::warn!(url = %job.url, "re-encode failed: {e}");
                None
            }
        });

    match fetched {
        FetchOutcome::Downloaded(path) => JobOutcome::Downloaded { path, reencode },
        FetchOutcome::AlreadyPresent(path) => JobOutcome::AlreadyPresent { path, reencode },
    }
}

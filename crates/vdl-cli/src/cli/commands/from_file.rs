//! Jobs from a claimed `urls.txt`.

use anyhow::{Context, Result};
use std::sync::Arc;
use vdl_core::batch_file::{self, BatchFile};
use vdl_core::dispatch::{BatchOptions, JobContext};

use super::{execute, summarize};
use crate::cli::Finished;

pub async fn run_from_file(ctx: &Arc<JobContext>, opts: BatchOptions, file: BatchFile) -> Result<Finished> {
    let BatchFile {
        jobs,
        skipped,
        log_path,
    } = file;

    ctx.console.line(format!(
        "[INFO] {} job(s) from batch file, log at {}",
        jobs.len(),
        log_path.display()
    ));
    for line in &skipped {
        ctx.console.line(format!("[SKIP] Unparsable line: {line}"));
    }

    let Some(report) = execute(ctx, jobs, opts).await else {
        return Ok(Finished::Interrupted);
    };
    summarize(ctx, &report);

    batch_file::append_run_log(&log_path, &report, &skipped)
        .with_context(|| format!("append run log to {}", log_path.display()))?;
    Ok(Finished::Completed)
}

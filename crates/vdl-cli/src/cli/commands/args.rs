//! URL tokens given on the command line.

use anyhow::Result;
use std::sync::Arc;
use vdl_core::dispatch::{BatchOptions, JobContext};
use vdl_core::input;

use super::{execute, summarize};
use crate::cli::{usage, Finished};

pub async fn run_args(ctx: &Arc<JobContext>, opts: BatchOptions, tokens: &[String]) -> Result<Finished> {
    // One bad token rejects the whole list before anything is downloaded.
    let jobs = match input::parse_tokens(tokens, ctx.auth.auth_codes_enabled()) {
        Ok(jobs) => jobs,
        Err(e) => {
            ctx.console.line(usage::BANNER);
            return Err(e.into());
        }
    };

    match execute(ctx, jobs, opts).await {
        Some(report) => {
            summarize(ctx, &report);
            Ok(Finished::Completed)
        }
        None => Ok(Finished::Interrupted),
    }
}

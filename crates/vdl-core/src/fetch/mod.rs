//! Fetch job: resolve a filename with yt-dlp, then download to it.
//!
//! Failures here end the one job; the batch carries on.

mod args;

pub use args::{download_command, download_progress, metadata_command};

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dispatch::JobContext;
use crate::input::Job;
use crate::naming;
use crate::tools::{exit_label, ToolError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("metadata lookup failed: {0}")]
    MetadataFailed(String),

    /// Empty or whitespace-containing filename from the metadata query.
    #[error("403 Blocked? metadata lookup returned no usable filename")]
    Blocked,

    #[error("yt-dlp exited with {}: {stderr}", exit_label(.code))]
    DownloadFailed { code: Option<i32>, stderr: String },

    #[error("download produced no file at {}", .0.display())]
    MissingOutput(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded(PathBuf),
    /// The target file existed before this run; no download was attempted.
    AlreadyPresent(PathBuf),
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Downloaded(p) | Self::AlreadyPresent(p) => p,
        }
    }
}

/// Asks yt-dlp for the title-based filename and sanitizes it.
pub fn resolve_stem(ctx: &JobContext, job: &Job) -> Result<String, FetchError> {
    let cmd = metadata_command(&ctx.tools.yt_dlp, &ctx.auth, job);
    let out = ctx.runner.run(&cmd)?;
    if !out.success() {
        return Err(FetchError::MetadataFailed(out.stderr_summary().to_string()));
    }
    naming::stem_from_metadata(&out.stdout).ok_or(FetchError::Blocked)
}

/// Downloads `job` to `output`, streaming yt-dlp progress to the console.
pub fn download(ctx: &JobContext, job: &Job, output: &Path) -> Result<(), FetchError> {
    let cmd = download_command(&ctx.tools.yt_dlp, &ctx.auth, job, output);
    let label = stem_label(output);
    let console = &ctx.console;

    let result = ctx.runner.run_streaming(&cmd, &mut |line: &str| {
        if let Some(progress) = download_progress(line) {
            console.progress(format!("[{label}] {progress}"));
        }
    });
    console.finish_progress();

    let out = result?;
    if !out.success() {
        return Err(FetchError::DownloadFailed {
            code: out.exit_code,
            stderr: out.stderr_summary().to_string(),
        });
    }
    if !output.is_file() {
        return Err(FetchError::MissingOutput(output.to_path_buf()));
    }
    Ok(())
}

/// Resolves the filename and downloads unless the file is already there.
pub fn fetch(ctx: &JobContext, job: &Job) -> Result<FetchOutcome, FetchError> {
    ctx.console.line(format!("[Downloading] {}", job.url));

    let stem = resolve_stem(ctx, job)?;
    let output = naming::output_path(&ctx.output_dir, &stem);
    if output.exists() {
        tracing::info!(url = %job.url, path = %output.display(), "output exists, skipping download");
        return Ok(FetchOutcome::AlreadyPresent(output));
    }

    tracing::info!(url = %job.url, path = %output.display(), "downloading");
    download(ctx, job, &output)?;
    Ok(FetchOutcome::Downloaded(output))
}

fn stem_label(output: &Path) -> String {
    output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

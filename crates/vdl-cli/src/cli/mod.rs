//! CLI for vdl, the batch video downloader.

mod commands;
mod usage;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use vdl_core::config::{self, ConfigOverrides};
use vdl_core::console::Console;
use vdl_core::dispatch::{BatchOptions, JobContext};
use vdl_core::tools::SystemRunner;
use vdl_core::{batch_file, setup};

use commands::{run_args, run_from_file, run_interactive};

/// Top-level CLI. Without URL arguments, `urls.txt` in the output directory is
/// processed if present, otherwise an interactive prompt starts.
#[derive(Debug, Parser)]
#[command(name = "vdl", version)]
#[command(about = "Batch video downloader with target-size re-encoding", long_about = None)]
pub struct Cli {
    /// URLs, each optionally followed by a target size (5000K, 5.6M, 1G) and,
    /// when a .netrc is present, a two-factor code.
    #[arg(value_name = "URL [SIZE] [CODE]")]
    pub tokens: Vec<String>,

    /// Directory to download into (default from config, normally /dl).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run at most N jobs at once (default: all).
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// Path to the yt-dlp executable.
    #[arg(long, value_name = "PATH")]
    pub yt_dlp: Option<PathBuf>,

    /// Path to the ffprobe executable.
    #[arg(long, value_name = "PATH")]
    pub ffprobe: Option<PathBuf>,

    /// Path to the ffmpeg executable.
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,
}

/// How a run ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finished {
    Completed,
    Interrupted,
}

impl Cli {
    pub async fn run_from_args() -> Result<Finished> {
        Cli::parse().run().await
    }

    pub async fn run(self) -> Result<Finished> {
        let cfg = config::load_or_init()
            .context("load config")?
            .apply_overrides(self.overrides());
        tracing::debug!("loaded config: {:?}", cfg);

        setup::ensure_output_dir_writable(&cfg.output_dir)?;

        let ctx = Arc::new(JobContext::new(
            cfg.output_dir.clone(),
            cfg.tool_paths(),
            Arc::new(SystemRunner),
            Console::stdout(),
        ));
        let opts = BatchOptions {
            max_parallel_jobs: cfg.max_parallel_jobs,
        };

        if !self.tokens.is_empty() {
            return run_args(&ctx, opts, &self.tokens).await;
        }

        let claimed = batch_file::claim(&cfg.output_dir, ctx.auth.auth_codes_enabled())
            .with_context(|| format!("read {}", cfg.output_dir.join(batch_file::URLS_FILE).display()))?;
        match claimed {
            Some(file) => run_from_file(&ctx, opts, file).await,
            None => run_interactive(&ctx, opts).await,
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_dir: self.output_dir.clone(),
            max_parallel_jobs: self.jobs,
            yt_dlp: self.yt_dlp.clone(),
            ffprobe: self.ffprobe.clone(),
            ffmpeg: self.ffmpeg.clone(),
        }
    }
}

#[cfg(test)]
mod tests;

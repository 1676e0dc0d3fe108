//! External tool invocation.
//!
//! Every yt-dlp/ffprobe/ffmpeg call goes through [`ToolRunner`]: a synchronous
//! call that returns exit code and captured output, optionally feeding each
//! stdout line to a callback for progress display. Jobs hold the runner as a
//! trait object so tests can script tool behaviour.

mod error;
mod system;

pub use error::ToolError;
pub use system::SystemRunner;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Program plus arguments for one external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Value following `flag`, if present (e.g. `-o <path>`).
    pub fn value_of(&self, flag: &str) -> Option<&Path> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(Path::new)
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    pub fn last_arg(&self) -> Option<&Path> {
        self.args.last().map(Path::new)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for a in &self.args {
            write!(f, " {}", a.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Structured result of a finished tool process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Last non-empty stderr line, for one-line diagnostics.
    pub fn stderr_summary(&self) -> &str {
        self.stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }
}

/// `status N`, or `signal` when the process had no exit code.
pub fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "signal".to_string(),
    }
}

/// Runs external tools to completion.
pub trait ToolRunner: Send + Sync {
    /// Runs `cmd`, calling `on_line` for every stdout line as it arrives.
    /// A nonzero exit is not an error here; inspect [`ToolOutput::success`].
    fn run_streaming(
        &self,
        cmd: &ToolCommand,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ToolOutput, ToolError>;

    fn run(&self, cmd: &ToolCommand) -> Result<ToolOutput, ToolError> {
        self.run_streaming(cmd, &mut |_: &str| {})
    }
}

/// Paths of the three external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub yt_dlp: PathBuf,
    pub ffprobe: PathBuf,
    pub ffmpeg: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            yt_dlp: PathBuf::from("yt-dlp"),
            ffprobe: PathBuf::from("ffprobe"),
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}

//! Re-encode failures. Skips are outcomes, not errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::tools::{exit_label, ToolError};

#[derive(Debug, Error)]
pub enum ReencodeError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("ffprobe failed: {0}")]
    ProbeFailed(String),

    #[error("could not read ffprobe output: {0}")]
    ProbeOutput(#[from] serde_json::Error),

    #[error("duration is missing or invalid ({0:?})")]
    InvalidDuration(Option<String>),

    #[error("ffmpeg exited with {}: {stderr}", exit_label(.code))]
    TranscodeFailed { code: Option<i32>, stderr: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReencodeError {
    pub(super) fn io(path: &std::path::Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| ReencodeError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

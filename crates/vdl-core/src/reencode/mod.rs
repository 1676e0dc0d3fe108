//! Re-encode a downloaded file to fit a size hint.
//!
//! Flow: size check → ffprobe → budget → ffmpeg into a temp file → keep the
//! smaller of the two. Skip conditions are reported as outcomes; only tool
//! and filesystem failures are errors. Nothing is retried.

mod error;
mod probe;
mod swap;
mod transcode;

pub use error::ReencodeError;
pub use probe::{parse_probe_json, probe, probe_command, MediaInfo};
pub use transcode::{progress_percent, temp_output_path, transcode_command};

use std::fmt;
use std::fs;
use std::path::Path;

use crate::budget::{self, EncodeDecision, DEFAULT_AUDIO_BITRATE};
use crate::dispatch::JobContext;
use crate::input::convert_to_bits;
use swap::TempOutput;

/// How a re-encode attempt ended. Sizes are in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReencodeOutcome {
    /// The size hint did not convert to a bit count.
    InvalidTarget,
    AlreadyWithinTarget,
    /// The planned bitrates predict a file larger than the current one.
    WouldNotShrink { predicted_bits: u64, current_bits: u64 },
    Replaced { before: u64, after: u64 },
    /// Smaller than the original but still above the target; original replaced anyway.
    ReplacedOverTarget { before: u64, after: u64, target_bytes: u64 },
    /// Transcoded file was not smaller; it was discarded.
    KeptOriginal { before: u64, after: u64 },
}

impl ReencodeOutcome {
    /// Console tag for the final status line.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Replaced { .. } => "[DONE]",
            Self::ReplacedOverTarget { .. } => "[PARTIAL]",
            _ => "[SKIP]",
        }
    }
}

impl fmt::Display for ReencodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget => {
                write!(f, "Encoding skipped. Valid size formats are <size>K/M/G, e.g. 13M")
            }
            Self::AlreadyWithinTarget => write!(f, "File already within target size"),
            Self::WouldNotShrink {
                predicted_bits,
                current_bits,
            } => write!(
                f,
                "Re-encoding would make the file bigger (predicted {} bytes, current {} bytes), skipping",
                predicted_bits / 8,
                current_bits / 8
            ),
            Self::Replaced { before, after } => {
                write!(f, "Re-encoded and replaced original ({before} -> {after} bytes)")
            }
            Self::ReplacedOverTarget {
                before,
                after,
                target_bytes,
            } => write!(
                f,
                "Re-encoded above target ({after} > {target_bytes} bytes) but smaller than original ({before} bytes); replaced"
            ),
            Self::KeptOriginal { before, after } => write!(
                f,
                "Encoded file not smaller than original ({after} >= {before} bytes), keeping original"
            ),
        }
    }
}

/// Re-encodes `input` in place so it fits `size_hint`, if that helps.
pub fn reencode_file(
    ctx: &JobContext,
    input: &Path,
    size_hint: &str,
) -> Result<ReencodeOutcome, ReencodeError> {
    let console = &ctx.console;
    let name = display_name(input);
    console.line(format!("[Re-encoding] {name} to target size {size_hint}"));

    let target_bits = convert_to_bits(size_hint);
    if target_bits == 0 {
        return Ok(ReencodeOutcome::InvalidTarget);
    }

    let before = file_len(input)?;
    let current_bits = before.saturating_mul(8);
    if current_bits <= target_bits {
        return Ok(ReencodeOutcome::AlreadyWithinTarget);
    }

    let info = probe(ctx.runner.as_ref(), &ctx.tools.ffprobe, input)?;
    let source_audio = info.audio_bitrate.unwrap_or(DEFAULT_AUDIO_BITRATE);
    tracing::debug!(
        file = %input.display(),
        duration = info.duration_secs,
        source_audio,
        "probed media"
    );

    let plan = match budget::decide(current_bits, target_bits, info.duration_secs, source_audio) {
        EncodeDecision::AlreadyWithinTarget => return Ok(ReencodeOutcome::AlreadyWithinTarget),
        EncodeDecision::WouldNotShrink { predicted_bits } => {
            return Ok(ReencodeOutcome::WouldNotShrink {
                predicted_bits,
                current_bits,
            })
        }
        EncodeDecision::Encode(plan) => plan,
    };

    console.line(format!(
        "[ENCODE] {name} video: {} kbps, audio: {} kbps",
        plan.selected_video_bitrate / 1000,
        plan.selected_audio_bitrate / 1000
    ));
    tracing::info!(
        file = %input.display(),
        video = plan.selected_video_bitrate,
        audio = plan.selected_audio_bitrate,
        bufsize = plan.buffer_size(),
        "transcoding"
    );

    let temp = TempOutput::new(temp_output_path(input, size_hint));
    let cmd = transcode_command(&ctx.tools.ffmpeg, input, temp.path(), &plan);
    let result = ctx.runner.run_streaming(&cmd, &mut |line: &str| {
        if let Some(pct) = progress_percent(line, plan.duration_secs) {
            console.progress(format!("[ENCODE] {name} {pct:5.1}%"));
        }
    });
    console.finish_progress();
    let out = result?;
    if !out.success() {
        return Err(ReencodeError::TranscodeFailed {
            code: out.exit_code,
            stderr: out.stderr_summary().to_string(),
        });
    }

    let after = file_len(temp.path())?;
    if after == 0 || after >= before {
        return Ok(ReencodeOutcome::KeptOriginal { before, after });
    }

    temp.replace(input).map_err(ReencodeError::io(input))?;
    let target_bytes = target_bits / 8;
    if after > target_bytes {
        Ok(ReencodeOutcome::ReplacedOverTarget {
            before,
            after,
            target_bytes,
        })
    } else {
        Ok(ReencodeOutcome::Replaced { before, after })
    }
}

fn file_len(path: &Path) -> Result<u64, ReencodeError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(ReencodeError::io(path))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

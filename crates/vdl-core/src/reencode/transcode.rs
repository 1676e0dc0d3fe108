//! ffmpeg invocation for a planned budget, plus progress parsing.

use std::path::{Path, PathBuf};

use crate::budget::BitrateBudget;
use crate::tools::ToolCommand;

/// Temp output next to the input: `{dir}/{stem}.{hint}.tmp.mp4`.
pub fn temp_output_path(input: &Path, size_hint: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}.{size_hint}.tmp.mp4"))
}

/// Single-pass H.264/AAC encode capped at the budget's bitrates, with
/// machine-readable progress on stdout.
pub fn transcode_command(
    ffmpeg: &Path,
    input: &Path,
    output: &Path,
    budget: &BitrateBudget,
) -> ToolCommand {
    let video = budget.selected_video_bitrate.to_string();
    let audio = budget.selected_audio_bitrate.to_string();
    let bufsize = budget.buffer_size().to_string();

    ToolCommand::new(ffmpeg)
        .args(["-hide_banner", "-loglevel", "error", "-nostats"])
        .args(["-progress", "pipe:1", "-y", "-i"])
        .arg(input)
        .args(["-c:v", "libx264"])
        .arg("-b:v")
        .arg(&video)
        .arg("-maxrate:v")
        .arg(&video)
        .arg("-bufsize:v")
        .arg(bufsize)
        .args(["-c:a", "aac", "-b:a"])
        .arg(audio)
        .arg(output)
}

/// Percent complete from one `-progress` line, if it carries the output clock.
pub fn progress_percent(line: &str, duration_secs: f64) -> Option<f64> {
    let micros = line
        .strip_prefix("out_time_us=")
        .or_else(|| line.strip_prefix("out_time_ms="))?;
    let micros: f64 = micros.trim().parse().ok()?;
    if duration_secs <= 0.0 || micros < 0.0 {
        return None;
    }
    Some((micros / 1_000_000.0 / duration_secs * 100.0).min(100.0))
}

//! Duration and audio bitrate via ffprobe's JSON writer.

use serde::Deserialize;
use std::path::Path;

use super::ReencodeError;
use crate::tools::{ToolCommand, ToolRunner};

/// What the budget needs to know about a downloaded file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    pub duration_secs: f64,
    /// Bitrate of the first audio stream; `None` if absent or reported as `N/A`.
    pub audio_bitrate: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    #[serde(default)]
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

pub fn probe_command(ffprobe: &Path, input: &Path) -> ToolCommand {
    ToolCommand::new(ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration:stream=codec_type,bit_rate",
            "-of",
            "json",
        ])
        .arg(input)
}

/// Runs ffprobe on `input` and parses the result.
pub fn probe(runner: &dyn ToolRunner, ffprobe: &Path, input: &Path) -> Result<MediaInfo, ReencodeError> {
    let out = runner.run(&probe_command(ffprobe, input))?;
    if !out.success() {
        return Err(ReencodeError::ProbeFailed(out.stderr_summary().to_string()));
    }
    parse_probe_json(&out.stdout)
}

/// Parses `-of json` output. Duration must be a positive, finite number.
pub fn parse_probe_json(json: &str) -> Result<MediaInfo, ReencodeError> {
    let parsed: ProbeOutput = serde_json::from_str(json)?;

    let raw_duration = parsed.format.and_then(|f| f.duration);
    let duration_secs = raw_duration
        .as_deref()
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| ReencodeError::InvalidDuration(raw_duration.clone()))?;

    let audio_bitrate = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .and_then(|s| s.bit_rate.as_deref())
        .and_then(|b| b.trim().parse::<u64>().ok())
        .filter(|&b| b > 0);

    Ok(MediaInfo {
        duration_secs,
        audio_bitrate,
    })
}

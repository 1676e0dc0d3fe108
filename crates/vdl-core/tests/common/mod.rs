#![allow(dead_code)]

pub mod fake_tools;

use std::path::Path;
use std::sync::Arc;
use vdl_core::console::{CaptureBuffer, Console};
use vdl_core::dispatch::JobContext;
use vdl_core::tools::ToolPaths;

use fake_tools::FakeTools;

/// Job context over `dir` backed by `tools`, with console output captured.
pub fn context(dir: &Path, tools: FakeTools) -> (Arc<JobContext>, Arc<FakeTools>, CaptureBuffer) {
    let tools = Arc::new(tools);
    let buf = CaptureBuffer::new();
    let ctx = JobContext::new(
        dir,
        ToolPaths::default(),
        tools.clone(),
        Console::new(Box::new(buf.clone())),
    );
    (Arc::new(ctx), tools, buf)
}

/// ffprobe JSON with the given duration and optional audio bitrate.
pub fn probe_json(duration_secs: f64, audio_bitrate: Option<u64>) -> String {
    let audio = audio_bitrate
        .map(|b| format!(r#",{{"codec_type":"audio","bit_rate":"{b}"}}"#))
        .unwrap_or_default();
    format!(
        r#"{{"streams":[{{"codec_type":"video","bit_rate":"900000"}}{audio}],"format":{{"duration":"{duration_secs}"}}}}"#
    )
}

pub fn write_sized(path: &Path, len: usize) {
    std::fs::write(path, vec![0u8; len]).unwrap();
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

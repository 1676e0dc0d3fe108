//! Scripted stand-in for yt-dlp, ffprobe and ffmpeg.
//!
//! Dispatches on the program's file name, writes the files the real tools
//! would write, and records every invocation for later assertions.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use vdl_core::tools::{ToolCommand, ToolError, ToolOutput, ToolRunner};

pub struct FakeTools {
    /// URL -> what the metadata query prints. Unknown URLs print nothing.
    titles: HashMap<String, String>,
    /// URLs whose download exits nonzero.
    failing_downloads: HashSet<String>,
    /// URLs whose download exits 0 without writing anything.
    empty_downloads: HashSet<String>,
    /// URLs whose metadata query panics inside the runner.
    panicking: HashSet<String>,
    download_bytes: usize,
    probe_stdout: String,
    /// Size of the transcoded file; `None` makes ffmpeg fail.
    encode_bytes: Option<usize>,
    calls: Mutex<Vec<ToolCommand>>,
}

impl Default for FakeTools {
    fn default() -> Self {
        Self {
            titles: HashMap::new(),
            failing_downloads: HashSet::new(),
            empty_downloads: HashSet::new(),
            panicking: HashSet::new(),
            download_bytes: 1024,
            probe_stdout: super::probe_json(100.0, Some(128_000)),
            encode_bytes: Some(512),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, url: &str, title: &str) -> Self {
        self.titles.insert(url.to_string(), title.to_string());
        self
    }

    pub fn failing_download(mut self, url: &str) -> Self {
        self.failing_downloads.insert(url.to_string());
        self
    }

    pub fn empty_download(mut self, url: &str) -> Self {
        self.empty_downloads.insert(url.to_string());
        self
    }

    pub fn panicking(mut self, url: &str) -> Self {
        self.panicking.insert(url.to_string());
        self
    }

    pub fn download_bytes(mut self, n: usize) -> Self {
        self.download_bytes = n;
        self
    }

    pub fn probe(mut self, duration_secs: f64, audio_bitrate: Option<u64>) -> Self {
        self.probe_stdout = super::probe_json(duration_secs, audio_bitrate);
        self
    }

    /// Raw ffprobe stdout, for malformed responses.
    pub fn probe_stdout(mut self, stdout: &str) -> Self {
        self.probe_stdout = stdout.to_string();
        self
    }

    pub fn encode_bytes(mut self, n: usize) -> Self {
        self.encode_bytes = Some(n);
        self
    }

    pub fn failing_encode(mut self) -> Self {
        self.encode_bytes = None;
        self
    }

    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations of the tool whose file name is `name`.
    pub fn calls_to(&self, name: &str) -> Vec<ToolCommand> {
        self.calls()
            .into_iter()
            .filter(|c| tool_name(c) == name)
            .collect()
    }

    fn yt_dlp(&self, cmd: &ToolCommand, on_line: &mut dyn FnMut(&str)) -> ToolOutput {
        let url = cmd
            .last_arg()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.panicking.contains(&url) {
            panic!("fake yt-dlp crashed on {url}");
        }
        if cmd.has_arg("--skip-download") {
            let title = self.titles.get(&url).cloned().unwrap_or_default();
            return ok(format!("{title}\n"));
        }
        if self.failing_downloads.contains(&url) {
            return failed(1, "ERROR: [generic] Unable to download webpage: HTTP Error 403");
        }

        if self.empty_downloads.contains(&url) {
            return ok(String::new());
        }

        let output = cmd.value_of("-o").expect("download without -o");
        on_line("[download] Destination: somewhere");
        on_line("[download]  50.0% of 1.00KiB at 1.00KiB/s ETA 00:01");
        std::fs::write(output, vec![7u8; self.download_bytes]).unwrap();
        on_line("[download] 100% of 1.00KiB in 00:00:01");
        ok(String::new())
    }

    fn ffmpeg(&self, cmd: &ToolCommand, on_line: &mut dyn FnMut(&str)) -> ToolOutput {
        let output = cmd.last_arg().expect("ffmpeg without output");
        on_line("out_time_us=50000000");
        on_line("progress=continue");
        match self.encode_bytes {
            Some(n) => {
                std::fs::write(output, vec![1u8; n]).unwrap();
                on_line("progress=end");
                ok(String::new())
            }
            None => {
                // Leave a partial file behind like an aborted encode would.
                std::fs::write(output, b"partial").unwrap();
                failed(1, "Conversion failed!")
            }
        }
    }
}

impl ToolRunner for FakeTools {
    fn run_streaming(
        &self,
        cmd: &ToolCommand,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ToolOutput, ToolError> {
        self.calls.lock().unwrap().push(cmd.clone());
        let out = match tool_name(cmd).as_str() {
            "yt-dlp" => self.yt_dlp(cmd, on_line),
            "ffprobe" => ok(self.probe_stdout.clone()),
            "ffmpeg" => self.ffmpeg(cmd, on_line),
            other => {
                return Err(ToolError::Spawn {
                    program: cmd.program.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("no fake for {other}"),
                    ),
                })
            }
        };
        Ok(out)
    }
}

fn tool_name(cmd: &ToolCommand) -> String {
    Path::new(&cmd.program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn ok(stdout: String) -> ToolOutput {
    ToolOutput {
        exit_code: Some(0),
        stdout,
        stderr: String::new(),
    }
}

fn failed(code: i32, stderr: &str) -> ToolOutput {
    ToolOutput {
        exit_code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

//! yt-dlp command lines.

use std::path::Path;

use crate::auth::AuthFiles;
use crate::input::Job;
use crate::tools::ToolCommand;

/// Metadata-only query printing the restricted title-based filename.
pub fn metadata_command(yt_dlp: &Path, auth: &AuthFiles, job: &Job) -> ToolCommand {
    ToolCommand::new(yt_dlp)
        .args([
            "--skip-download",
            "--print",
            "filename",
            "-o",
            "%(title)s",
            "--restrict-filenames",
        ])
        .args(auth.fetch_args(job.auth_code.as_deref()))
        .arg(&job.url)
}

/// The real download, remuxed/merged into mp4 at `output`.
pub fn download_command(yt_dlp: &Path, auth: &AuthFiles, job: &Job, output: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(yt_dlp).args([
        "--remux-video",
        "mp4",
        "--merge-output-format",
        "mp4",
        "--newline",
    ]);
    if let Some(hint) = &job.size_hint {
        // Prefer source formats close to the budget so less re-encoding is needed.
        cmd = cmd.arg("--format-sort").arg(format!("filesize:{hint}"));
    }
    cmd.args(auth.fetch_args(job.auth_code.as_deref()))
        .arg("-o")
        .arg(output)
        .arg(&job.url)
}

/// The human part of a `[download]` progress line, if `line` is one.
pub fn download_progress(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("[download]")?.trim();
    rest.contains('%').then_some(rest)
}

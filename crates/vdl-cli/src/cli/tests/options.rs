use super::parse;
use crate::cli::Cli;
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_output_dir() {
    let cli = parse(&["vdl", "--output-dir", "/srv/videos"]);
    assert_eq!(cli.output_dir.as_deref(), Some(Path::new("/srv/videos")));
    let short = parse(&["vdl", "-o", "/tmp"]);
    assert_eq!(short.output_dir.as_deref(), Some(Path::new("/tmp")));
}

#[test]
fn cli_parse_tool_paths_become_overrides() {
    let cli = parse(&[
        "vdl",
        "--yt-dlp",
        "/yt-dlp",
        "--ffprobe",
        "/opt/ffprobe",
        "--ffmpeg",
        "/opt/ffmpeg",
        "-j",
        "3",
    ]);
    let o = cli.overrides();
    assert_eq!(o.yt_dlp.as_deref(), Some(Path::new("/yt-dlp")));
    assert_eq!(o.ffprobe.as_deref(), Some(Path::new("/opt/ffprobe")));
    assert_eq!(o.ffmpeg.as_deref(), Some(Path::new("/opt/ffmpeg")));
    assert_eq!(o.max_parallel_jobs, Some(3));
    assert!(o.output_dir.is_none());
}

#[test]
fn cli_parse_rejects_bad_jobs_value() {
    assert!(Cli::try_parse_from(["vdl", "--jobs", "many"]).is_err());
}

//! `urls.txt` batch mode.
//!
//! The file is read, then renamed to `urls_<epoch>.txt` so it is not picked up
//! again; the renamed file collects this run's failures afterwards.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::dispatch::BatchReport;
use crate::input::{self, Job};

pub const URLS_FILE: &str = "urls.txt";

/// A claimed batch file: its jobs, the lines that did not parse, and where it now lives.
#[derive(Debug)]
pub struct BatchFile {
    pub jobs: Vec<Job>,
    pub skipped: Vec<String>,
    pub log_path: PathBuf,
}

/// Parses batch-file text. Blank lines and `#` / `//` comments are ignored;
/// lines that fail to parse are returned in the second vec, trimmed.
pub fn parse_lines(contents: &str, auth_enabled: bool) -> (Vec<Job>, Vec<String>) {
    let mut jobs = Vec::new();
    let mut skipped = Vec::new();
    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        match input::parse_line(line, auth_enabled) {
            Ok(parsed) => jobs.extend(parsed),
            Err(e) => {
                tracing::warn!(line, "skipping batch line: {e}");
                skipped.push(line.to_string());
            }
        }
    }
    (jobs, skipped)
}

/// Reads and renames `dir/urls.txt` if there is one.
pub fn claim(dir: &Path, auth_enabled: bool) -> io::Result<Option<BatchFile>> {
    let path = dir.join(URLS_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path)?;
    let (jobs, skipped) = parse_lines(&contents, auth_enabled);

    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let log_path = free_log_path(dir, epoch);
    fs::rename(&path, &log_path)?;
    tracing::info!(
        from = %path.display(),
        to = %log_path.display(),
        jobs = jobs.len(),
        skipped = skipped.len(),
        "claimed batch file"
    );

    Ok(Some(BatchFile {
        jobs,
        skipped,
        log_path,
    }))
}

/// `urls_<epoch>.txt`, or `urls_<epoch>_<n>.txt` if earlier runs in the same second took it.
fn free_log_path(dir: &Path, epoch: u64) -> PathBuf {
    let first = dir.join(format!("urls_{epoch}.txt"));
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| dir.join(format!("urls_{epoch}_{n}.txt")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// Appends duplicates, failed jobs and unparsable lines to the claimed file.
pub fn append_run_log(path: &Path, report: &BatchReport, skipped: &[String]) -> io::Result<()> {
    let mut log = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(log)?;
    for url in &report.duplicates {
        writeln!(log, "[SKIP] Duplicate URL: {url}")?;
    }
    for (job, reason) in report.failed() {
        writeln!(log, "{} FAILED: {reason}", job.url)?;
    }
    for line in skipped {
        writeln!(log, "SKIPPED: {line}")?;
    }
    log.flush()
}

//! Output filename derivation from the fetch tool's metadata answer.

mod sanitize;

pub use sanitize::{sanitize_filename, MAX_STEM_CHARS};

use std::path::{Path, PathBuf};

/// Extension every download is remuxed/merged into.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Turns the raw `--print filename` output into a safe file stem.
///
/// Returns `None` when the answer is empty or contains whitespace: with
/// `--restrict-filenames` neither happens for a real title, so it usually
/// means the site blocked the request (or returned several entries).
pub fn stem_from_metadata(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return None;
    }
    let stem = sanitize_filename(raw);
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// `{dir}/{stem}.mp4`
pub fn output_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{OUTPUT_EXTENSION}"))
}

//! Temp transcoder output that is either renamed over the original or removed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Removes the temp file when dropped unless [`TempOutput::replace`] consumed it.
pub(super) struct TempOutput {
    path: PathBuf,
    armed: bool,
}

impl TempOutput {
    pub(super) fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically renames the temp file over `original` (same directory).
    pub(super) fn replace(mut self, original: &Path) -> io::Result<()> {
        fs::rename(&self.path, original)?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for TempOutput {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = fs::remove_file(&self.path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), "could not remove temp output: {e}");
                }
            }
        }
    }
}

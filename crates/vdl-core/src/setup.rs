//! Start-up checks run before any job.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("output directory {} does not exist", .0.display())]
    MissingOutputDir(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("output directory {} is not writable: {source}", .path.display())]
    NotWritable { path: PathBuf, source: io::Error },
}

/// Fails unless `dir` exists, is a directory, and accepts a new file.
pub fn ensure_output_dir_writable(dir: &Path) -> Result<(), SetupError> {
    let meta = match dir.metadata() {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SetupError::MissingOutputDir(dir.to_path_buf()))
        }
        Err(source) => {
            return Err(SetupError::NotWritable {
                path: dir.to_path_buf(),
                source,
            })
        }
    };
    if !meta.is_dir() {
        return Err(SetupError::NotADirectory(dir.to_path_buf()));
    }

    // Removed again when dropped.
    tempfile::Builder::new()
        .prefix(".vdl-write-check")
        .tempfile_in(dir)
        .map(drop)
        .map_err(|source| SetupError::NotWritable {
            path: dir.to_path_buf(),
            source,
        })
}

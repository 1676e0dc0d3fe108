//! Everything a job needs, shared read-only between concurrent jobs.

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::AuthFiles;
use crate::console::Console;
use crate::tools::{ToolPaths, ToolRunner};

pub struct JobContext {
    pub output_dir: PathBuf,
    pub tools: ToolPaths,
    pub auth: AuthFiles,
    pub runner: Arc<dyn ToolRunner>,
    pub console: Console,
}

impl JobContext {
    /// Context for `output_dir`, discovering credential files there.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        tools: ToolPaths,
        runner: Arc<dyn ToolRunner>,
        console: Console,
    ) -> Self {
        let output_dir = output_dir.into();
        let auth = AuthFiles::discover(&output_dir);
        Self {
            output_dir,
            tools,
            auth,
            runner,
            console,
        }
    }
}

use vdl_core::logging;

mod cli;

use crate::cli::{Cli, Finished};

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; a read-only state dir must not stop downloads.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {err:#}");
    }

    match Cli::run_from_args().await {
        Ok(Finished::Completed) => {}
        Ok(Finished::Interrupted) => {
            println!("\n[CTRL+C]");
            tracing::info!("interrupted by user");
            std::process::exit(130);
        }
        Err(err) => {
            eprintln!("vdl error: {:#}", err);
            std::process::exit(1);
        }
    }
}

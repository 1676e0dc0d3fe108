//! Line-by-line prompt used when there is nothing else to do.

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;
use vdl_core::dispatch::{BatchOptions, JobContext};
use vdl_core::input;

use super::{execute, summarize};
use crate::cli::{usage, Finished};

const PROMPT: &str = "> ";

pub async fn run_interactive(ctx: &Arc<JobContext>, opts: BatchOptions) -> Result<Finished> {
    let console = &ctx.console;
    console.line(usage::BANNER);
    console.line(usage::PROMPT_HINT);

    let mut rl = DefaultEditor::new().context("start line editor")?;
    loop {
        let line = match read_blocking(|| rl.readline(PROMPT)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("read input line"),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);
        if is_quit(line) {
            break;
        }

        // A bad line is reported and the prompt continues.
        let jobs = match input::parse_line(line, ctx.auth.auth_codes_enabled()) {
            Ok(jobs) => jobs,
            Err(e) => {
                console.line(format!("{e}. {}", usage::INPUT_HINT));
                continue;
            }
        };

        match execute(ctx, jobs, opts).await {
            Some(report) => summarize(ctx, &report),
            None => return Ok(Finished::Interrupted),
        }
    }

    console.line("Bye!");
    Ok(Finished::Completed)
}

/// Runs a blocking terminal read without stalling other tasks on this worker.
fn read_blocking<R>(read: impl FnOnce() -> R) -> R {
    tokio::task::block_in_place(read)
}

fn is_quit(line: &str) -> bool {
    ["q", "quit", "exit"]
        .iter()
        .any(|word| line.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::{is_quit, read_blocking};
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn quit_words_any_case() {
        for w in ["q", "Q", "quit", "QUIT", "exit", "Exit"] {
            assert!(is_quit(w), "{w}");
        }
        assert!(!is_quit("https://example.com/quit"));
        assert!(!is_quit("quitter"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawned_work_progresses_during_blocking_read() {
        let (tx, rx) = mpsc::channel();
        let sender = tokio::spawn(async move {
            tx.send("line").unwrap();
        });
        let got = read_blocking(|| rx.recv_timeout(Duration::from_secs(5)));
        assert_eq!(got, Ok("line"));
        sender.await.unwrap();
    }
}

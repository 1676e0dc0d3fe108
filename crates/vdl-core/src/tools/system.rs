//! [`ToolRunner`] backed by real child processes.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;

use super::{ToolCommand, ToolError, ToolOutput, ToolRunner};

/// Spawns the program with piped stdout/stderr and waits for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run_streaming(
        &self,
        cmd: &ToolCommand,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ToolOutput, ToolError> {
        let io_err = |source| ToolError::Io {
            program: cmd.program.clone(),
            source,
        };

        tracing::debug!(command = %cmd, "spawning tool");
        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: cmd.program.clone(),
                source,
            })?;

        // Drain stderr on its own thread so a chatty tool cannot block on a full pipe.
        let stderr_handle = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        let stdout = match child.stdout.take() {
            Some(pipe) => pump_lines(pipe, on_line),
            None => Ok(String::new()),
        };
        let stdout = match stdout {
            Ok(s) => s,
            Err(e) => {
                // Reap the child so it does not linger as a zombie; its stderr is dropped.
                let _ = child.kill();
                let _ = child.wait();
                if let Some(h) = stderr_handle {
                    let _ = h.join();
                }
                return Err(io_err(e));
            }
        };

        let status = child.wait().map_err(io_err)?;
        let stderr = stderr_handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default();

        tracing::debug!(command = %cmd, code = ?status.code(), "tool exited");
        Ok(ToolOutput {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    }
}

/// Feeds each `\n`-terminated line (minus a trailing `\r`) to `on_line` and
/// returns everything read, re-joined with `\n`.
fn pump_lines(reader: impl Read, on_line: &mut dyn FnMut(&str)) -> io::Result<String> {
    let mut out = String::new();
    for line in BufReader::new(reader).split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        let line = line.trim_end_matches('\r');
        on_line(line);
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

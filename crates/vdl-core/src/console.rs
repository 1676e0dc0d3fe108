//! Serialized terminal output shared by concurrent jobs.
//!
//! Status lines are printed whole. Progress lines are rewritten in place
//! (`\r` + erase-to-end) until the next status line, so concurrent jobs never
//! interleave partial lines.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

struct ConsoleState {
    out: Box<dyn Write + Send>,
    /// True while the cursor sits on an unfinished progress line.
    progress_open: bool,
}

/// Cloneable handle to the one terminal writer. All jobs receive a clone.
#[derive(Clone)]
pub struct Console {
    state: Arc<Mutex<ConsoleState>>,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ConsoleState {
                out,
                progress_open: false,
            })),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Discards everything; for tests and non-interactive embedding.
    pub fn sink() -> Self {
        Self::new(Box::new(io::sink()))
    }

    /// Prints a complete status line, closing any open progress line first.
    pub fn line(&self, msg: impl Display) {
        let mut state = self.lock();
        let prefix = if state.progress_open { "\n" } else { "" };
        state.progress_open = false;
        let _ = writeln!(state.out, "{prefix}{msg}");
        let _ = state.out.flush();
    }

    /// Overwrites the current progress line with `msg`.
    pub fn progress(&self, msg: impl Display) {
        let mut state = self.lock();
        state.progress_open = true;
        let _ = write!(state.out, "\r{msg}\x1b[K");
        let _ = state.out.flush();
    }

    /// Ends an open progress line without printing anything else.
    pub fn finish_progress(&self) {
        let mut state = self.lock();
        if state.progress_open {
            state.progress_open = false;
            let _ = writeln!(state.out);
            let _ = state.out.flush();
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConsoleState> {
        // A job that panicked mid-write leaves nothing worth protecting.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// In-memory writer for tests: `Console::new(Box::new(buf.clone()))`, then `buf.contents()`.
#[derive(Clone, Default)]
pub struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> (Console, CaptureBuffer) {
        let buf = CaptureBuffer::new();
        (Console::new(Box::new(buf.clone())), buf)
    }

    #[test]
    fn status_lines_are_newline_terminated() {
        let (console, buf) = capture();
        console.line("[Downloading] https://a");
        console.line("done");
        assert_eq!(buf.contents(), "[Downloading] https://a\ndone\n");
    }

    #[test]
    fn progress_overwrites_in_place_until_next_line() {
        let (console, buf) = capture();
        console.progress("10%");
        console.progress("55%");
        console.line("finished");
        assert_eq!(buf.contents(), "\r10%\x1b[K\r55%\x1b[K\nfinished\n");
    }

    #[test]
    fn finish_progress_only_breaks_open_lines() {
        let (console, buf) = capture();
        console.finish_progress();
        console.progress("x");
        console.finish_progress();
        console.finish_progress();
        assert_eq!(buf.contents(), "\rx\x1b[K\n");
    }

    #[test]
    fn clones_share_one_writer() {
        let (console, buf) = capture();
        let other = console.clone();
        let handle = std::thread::spawn(move || {
            for _ in 0..50 {
                other.line("b");
            }
        });
        for _ in 0..50 {
            console.line("a");
        }
        handle.join().unwrap();
        let out = buf.contents();
        assert_eq!(out.lines().count(), 100);
        assert!(out.lines().all(|l| l == "a" || l == "b"));
    }
}

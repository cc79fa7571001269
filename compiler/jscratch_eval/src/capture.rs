//! Process-wide console capture.
//!
//! While a run is in progress, everything host code prints through
//! [`out`] and [`err`] is split into lines and delivered to the run's
//! [`OutputSink`] as each line completes. [`begin`] installs a sink and
//! returns a guard; dropping the guard flushes a trailing partial line and
//! reinstates whatever sink was active before (also during unwinding).
//!
//! Without an active capture, writes go to the process's stdout/stderr.

use std::fmt;
use std::io::{self, Write as _};
use std::sync::Arc;

use parking_lot::{const_mutex, Mutex};

/// Which console stream a line was written to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    Out,
    Err,
}

/// Receiver of captured console lines.
pub trait OutputSink: Send + Sync {
    /// One line of output, without its terminator.
    fn line(&self, stream: Stream, text: &str);
}

/// Shared sink handle.
pub type SharedSink = Arc<dyn OutputSink>;

struct CaptureState {
    sink: SharedSink,
    out: String,
    err: String,
}

impl CaptureState {
    fn new(sink: SharedSink) -> Self {
        CaptureState {
            sink,
            out: String::new(),
            err: String::new(),
        }
    }

    /// Append text and drain every completed line.
    fn push(&mut self, stream: Stream, text: &str) -> Vec<String> {
        let buffer = match stream {
            Stream::Out => &mut self.out,
            Stream::Err => &mut self.err,
        };
        buffer.push_str(text);
        let mut lines = Vec::new();
        while let Some(end) = buffer.find('\n') {
            let mut line: String = buffer.drain(..=end).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }

    fn flush(mut self) {
        for (stream, rest) in [
            (Stream::Out, std::mem::take(&mut self.out)),
            (Stream::Err, std::mem::take(&mut self.err)),
        ] {
            if !rest.is_empty() {
                self.sink.line(stream, &rest);
            }
        }
    }
}

static ACTIVE: Mutex<Option<CaptureState>> = const_mutex(None);

/// Restores the previous capture state when dropped.
#[must_use = "capture ends when the guard is dropped"]
pub struct CaptureGuard {
    previous: Option<CaptureState>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        let finished = std::mem::replace(&mut *ACTIVE.lock(), self.previous.take());
        // Deliver outside the lock; the sink may print.
        if let Some(state) = finished {
            state.flush();
        }
    }
}

/// Start capturing console output into `sink`.
pub fn begin(sink: SharedSink) -> CaptureGuard {
    let previous = ACTIVE.lock().replace(CaptureState::new(sink));
    CaptureGuard { previous }
}

/// Whether a capture is currently installed.
pub fn is_active() -> bool {
    ACTIVE.lock().is_some()
}

/// Write `text` to `stream`.
pub fn write(stream: Stream, text: &str) {
    let delivery = {
        let mut active = ACTIVE.lock();
        active
            .as_mut()
            .map(|state| (Arc::clone(&state.sink), state.push(stream, text)))
    };
    match delivery {
        Some((sink, lines)) => {
            for line in &lines {
                sink.line(stream, line);
            }
        }
        // Nowhere to report a failed console write.
        None => {
            let _ = match stream {
                Stream::Out => io::stdout().write_all(text.as_bytes()),
                Stream::Err => io::stderr().write_all(text.as_bytes()),
            };
        }
    }
}

/// Writer for the standard output stream.
pub fn out() -> ConsoleWriter {
    ConsoleWriter(Stream::Out)
}

/// Writer for the standard error stream.
pub fn err() -> ConsoleWriter {
    ConsoleWriter(Stream::Err)
}

/// `System.out`/`System.err` for host code.
#[derive(Copy, Clone, Debug)]
pub struct ConsoleWriter(Stream);

impl ConsoleWriter {
    pub fn print(self, text: &str) {
        write(self.0, text);
    }

    pub fn println(self, text: &str) {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        write(self.0, &line);
    }
}

impl fmt::Write for ConsoleWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write(self.0, s);
        Ok(())
    }
}

/// Sink that collects lines in memory.
#[derive(Default)]
pub struct BufferSink {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Lines written to `stream`, in order.
    pub fn lines(&self, stream: Stream) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl OutputSink for BufferSink {
    fn line(&self, stream: Stream, text: &str) {
        self.lines.lock().push((stream, text.to_string()));
    }
}

/// Serializes tests that install a capture; the capture is process-wide.
#[cfg(test)]
pub(crate) static CAPTURE_TEST_LOCK: Mutex<()> = const_mutex(());

#[cfg(test)]
mod tests;

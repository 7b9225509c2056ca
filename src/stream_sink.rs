use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;

use crate::level::{should_emit_verbose, Severity};
use crate::module::ModuleKey;
use crate::sink::Sink;

/// A [`Sink`] that writes text lines to an `io::Write` stream.
///
/// This is the default sink of the process (writing to stderr). Each line is
/// written as `"[LEVEL] message\n"` or `"[module(verbosity)] message\n"` and
/// the stream is flushed after every line.
///
/// # Thread Safety
///
/// The stream and the verbosity map live behind one mutex, so two writers can
/// never splice their lines together. The severity threshold is an atomic and
/// is read without the lock, which keeps filtered statements lock-free.
///
/// # Examples
///
/// ```
/// # use benchlog::{Sink, StreamSink, Severity};
/// let sink = StreamSink::new(Vec::<u8>::new());
/// sink.set_level(Severity::Warn);
/// sink.write(Severity::Info, "dropped");
/// sink.write(Severity::Error, "kept");
/// ```
pub struct StreamSink {
    level: AtomicU8,
    inner: Mutex<StreamState>,
}

struct StreamState {
    stream: Box<dyn Write + Send>,
    verbosities: HashMap<ModuleKey, i32>,
}

impl StreamSink {
    /// Creates a sink writing to `stream` with the threshold at `Info`.
    pub fn new(stream: impl Write + Send + 'static) -> Self {
        Self {
            level: AtomicU8::new(Severity::Info.as_u8()),
            inner: Mutex::new(StreamState {
                stream: Box::new(stream),
                verbosities: HashMap::new(),
            }),
        }
    }

    /// Creates a sink writing to standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Creates a sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Redirects all later lines to `stream`. The previous stream is flushed
    /// and dropped.
    pub fn set_stream(&self, stream: impl Write + Send + 'static) {
        let mut state = self.inner.lock();
        let _ = state.stream.flush();
        state.stream = Box::new(stream);
    }

    /// Forgets every configured module verbosity.
    pub fn clear_verbosities(&self) {
        self.inner.lock().verbosities.clear();
    }
}

impl Default for StreamSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl StreamState {
    fn write_line(&mut self, prefix: std::fmt::Arguments<'_>, line: &str) {
        // Stream errors are absorbed, logging is best effort.
        let _ = self.stream.write_fmt(prefix);
        let _ = self.stream.write_all(line.as_bytes());
        let _ = self.stream.write_all(b"\n");
        let _ = self.stream.flush();
    }
}

impl Sink for StreamSink {
    #[inline]
    fn level(&self) -> Severity {
        Severity::from_u8(self.level.load(Ordering::Relaxed))
    }

    fn set_level(&self, level: Severity) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    fn verbosity(&self, module: ModuleKey) -> i32 {
        self.inner
            .lock()
            .verbosities
            .get(&module)
            .copied()
            .unwrap_or(0)
    }

    fn set_verbosity(&self, module: ModuleKey, verbosity: i32) {
        self.inner.lock().verbosities.insert(module, verbosity);
    }

    fn write_unfiltered(&self, level: Severity, line: &str) {
        let mut state = self.inner.lock();
        state.write_line(format_args!("[{}] ", level.name()), line);
    }

    fn write_verbose(&self, module: ModuleKey, verbosity: i32, line: &str) {
        // Resolve the name first, the registry has its own lock.
        let name = module.name();
        let mut state = self.inner.lock();
        let threshold = state.verbosities.get(&module).copied().unwrap_or(0);
        if !should_emit_verbose(verbosity, threshold) {
            return;
        }
        state.write_line(format_args!("[{}({})] ", name, verbosity), line);
    }

    fn flush(&self) {
        let _ = self.inner.lock().stream.flush();
    }
}

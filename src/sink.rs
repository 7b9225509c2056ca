use std::panic::panic_any;

use crate::error::Failure;
use crate::level::{should_emit, should_emit_verbose, Severity};
use crate::module::ModuleKey;

/// Destination for finished log lines.
///
/// A sink owns the filtering state (minimum severity and per-module
/// verbosity) and serialises writes so that lines never interleave. The crate
/// ships one implementation, [`StreamSink`](crate::StreamSink), which writes
/// text to any `io::Write`; custom sinks can be installed process-wide with
/// [`set_logger`](crate::set_logger) or passed explicitly to
/// [`Message`](crate::Message), [`ScopedBenchmark`](crate::ScopedBenchmark)
/// and [`BenchmarkSuite::log_to`](crate::BenchmarkSuite::log_to).
///
/// Ordinary writes never fail. A sink that cannot write its line drops it.
///
/// # Usage
///
/// ```
/// # use benchlog::{Sink, Severity, module::ModuleKey};
/// # use parking_lot::Mutex;
/// // A sink that keeps lines in memory
/// #[derive(Default)]
/// struct Memory(Mutex<Vec<String>>);
///
/// impl Sink for Memory {
///     fn level(&self) -> Severity { Severity::Info }
///     fn set_level(&self, _level: Severity) {}
///     fn verbosity(&self, _module: ModuleKey) -> i32 { 0 }
///     fn set_verbosity(&self, _module: ModuleKey, _verbosity: i32) {}
///     fn write_unfiltered(&self, level: Severity, line: &str) {
///         self.0.lock().push(format!("[{}] {}", level, line));
///     }
///     fn write_verbose(&self, module: ModuleKey, verbosity: i32, line: &str) {
///         self.0.lock().push(format!("[{}({})] {}", module.name(), verbosity, line));
///     }
/// }
///
/// let sink = Memory::default();
/// sink.write(Severity::Warn, "disk almost full");
/// assert_eq!(sink.0.lock()[0], "[WARN] disk almost full");
/// ```
pub trait Sink: Send + Sync {
    /// Current minimum severity.
    fn level(&self) -> Severity;

    /// Replaces the minimum severity. A concurrent write may observe either
    /// the old or the new value.
    fn set_level(&self, level: Severity);

    /// Verbosity threshold of `module`, 0 when never configured.
    fn verbosity(&self, module: ModuleKey) -> i32;

    /// Sets the verbosity threshold of `module`.
    fn set_verbosity(&self, module: ModuleKey, verbosity: i32);

    /// Writes `"[LEVEL] " + line` without consulting the threshold.
    fn write_unfiltered(&self, level: Severity, line: &str);

    /// Writes `"[module(verbosity)] " + line` if `verbosity` passes the
    /// module's threshold. The check and the write must happen in one
    /// critical section.
    fn write_verbose(&self, module: ModuleKey, verbosity: i32, line: &str);

    /// Flushes buffered output, if any.
    fn flush(&self) {}

    /// Whether a message at `level` would be written.
    #[inline]
    fn enabled(&self, level: Severity) -> bool {
        level.is_unfilterable() || should_emit(level, self.level())
    }

    /// Whether a verbose statement for `module` would be written.
    #[inline]
    fn verbose_enabled(&self, module: ModuleKey, verbosity: i32) -> bool {
        should_emit_verbose(verbosity, self.verbosity(module))
    }

    /// Writes `"[LEVEL] " + line` if `level` passes the threshold.
    ///
    /// The rejected path only compares two levels.
    #[inline]
    fn write(&self, level: Severity, line: &str) {
        if !self.enabled(level) {
            return;
        }
        self.write_unfiltered(level, line);
    }

    /// Writes the line at `Fatal` regardless of the threshold, then raises
    /// [`Failure::Fatal`].
    fn write_fatal_and_signal(&self, line: &str) -> ! {
        self.write_unfiltered(Severity::Fatal, line);
        self.flush();
        panic_any(Failure::Fatal {
            message: line.to_string(),
        })
    }

    /// Writes the line at `Check` regardless of the threshold, then raises
    /// [`Failure::Check`].
    fn write_check_and_signal(&self, line: &str) -> ! {
        self.write_unfiltered(Severity::Check, line);
        self.flush();
        panic_any(Failure::Check {
            message: line.to_string(),
        })
    }
}

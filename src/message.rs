use crate::config::show_location;
use crate::loggable::Loggable;
use crate::logger::get_logger;
use crate::level::Severity;
use crate::module::ModuleKey;
use crate::sink::Sink;

/// What a message is emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A leveled statement. `Fatal` and `Check` levels raise after writing.
    Level(Severity),
    /// A module-scoped statement filtered by verbosity.
    Verbose { module: ModuleKey, verbosity: i32 },
    /// A fatal statement, always written, then [`Failure::Fatal`](crate::Failure) is raised.
    Fatal,
    /// A failed check, always written, then [`Failure::Check`](crate::Failure) is raised.
    Check,
}

impl Target {
    /// Whether a message with this target would be written to `sink`.
    #[inline]
    pub fn enabled_in(self, sink: &dyn Sink) -> bool {
        match self {
            Target::Level(level) => sink.enabled(level),
            Target::Verbose { module, verbosity } => sink.verbose_enabled(module, verbosity),
            Target::Fatal | Target::Check => true,
        }
    }
}

/// Builds and emits a message only if `target` is enabled in `sink`.
///
/// The function form of the logging macros: `build` runs only when the
/// statement passes the filter.
///
/// ```
/// # use benchlog::{message::emit_with, Severity, StreamSink, Target, Sink};
/// let sink = StreamSink::new(Vec::<u8>::new());
/// sink.set_level(Severity::Error);
/// emit_with(&sink, Target::Level(Severity::Info), |_| unreachable!());
/// emit_with(&sink, Target::Level(Severity::Error), |message| {
///     message.append("disk full");
/// });
/// ```
pub fn emit_with<F>(sink: &dyn Sink, target: Target, build: F)
where
    F: FnOnce(&mut Message<'_>),
{
    if !target.enabled_in(sink) {
        return;
    }
    let mut message = Message::with_sink(sink, target);
    build(&mut message);
    message.emit();
}

/// Per-statement message accumulator.
///
/// A `Message` is bound to one sink when it is created and collects appended
/// values into a text buffer. It is delivered exactly once: either by
/// [`emit`](Message::emit) or, if that never happens, when it is dropped.
///
/// The macros ([`log!`](crate::log), [`vlog!`](crate::vlog),
/// [`check!`](crate::check)) build messages for you and skip construction
/// entirely when the statement is filtered out.
///
/// # Examples
///
/// ```
/// # use benchlog::{Message, Target, Severity, StreamSink};
/// let sink = StreamSink::new(Vec::<u8>::new());
/// let mut message = Message::with_sink(&sink, Target::Level(Severity::Warn));
/// message.append(&"retrying in ").append(&3).append(&"s");
/// assert_eq!(message.text(), "retrying in 3s");
/// message.emit();
/// ```
pub struct Message<'a> {
    sink: &'a dyn Sink,
    target: Target,
    location: Option<(&'static str, u32)>,
    buffer: String,
    emitted: bool,
}

impl Message<'static> {
    /// Creates a message bound to the currently active logger.
    pub fn new(target: Target) -> Self {
        Message::with_sink(get_logger(), target)
    }
}

impl<'a> Message<'a> {
    /// Creates a message bound to `sink`.
    pub fn with_sink(sink: &'a dyn Sink, target: Target) -> Self {
        Self {
            sink,
            target,
            location: None,
            buffer: String::new(),
            emitted: false,
        }
    }

    /// Attaches the call site, printed as `file(line): ` before the text.
    pub fn at(mut self, file: &'static str, line: u32) -> Self {
        self.location = Some((file, line));
        self
    }

    /// Appends one value.
    #[inline]
    pub fn append<T: Loggable + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.put(&mut self.buffer);
        self
    }

    /// Text accumulated so far, without the location prefix.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn sink(&self) -> &'a dyn Sink {
        self.sink
    }

    /// Delivers the message now.
    ///
    /// Raises a [`Failure`](crate::Failure) panic after writing when the
    /// target is `Fatal` or `Check`.
    pub fn emit(mut self) {
        self.deliver();
    }

    fn line(&mut self) -> String {
        with_location(self.location, std::mem::take(&mut self.buffer))
    }

    fn deliver(&mut self) {
        if self.emitted {
            return;
        }
        self.emitted = true;

        let line = self.line();
        let signal = !std::thread::panicking();
        match self.target {
            Target::Level(Severity::Fatal) | Target::Fatal => {
                if signal {
                    self.sink.write_fatal_and_signal(&line)
                }
                self.sink.write_unfiltered(Severity::Fatal, &line);
            }
            Target::Level(Severity::Check) | Target::Check => {
                if signal {
                    self.sink.write_check_and_signal(&line)
                }
                self.sink.write_unfiltered(Severity::Check, &line);
            }
            Target::Level(level) => self.sink.write(level, &line),
            Target::Verbose { module, verbosity } => {
                self.sink.write_verbose(module, verbosity, &line)
            }
        }
    }
}

/// Prefixes `text` with `file(line): ` when a location is known and location
/// display is enabled.
pub(crate) fn with_location(location: Option<(&'static str, u32)>, text: String) -> String {
    match location {
        Some((file, line)) if show_location() => format!("{}({}): {}", file, line, text),
        _ => text,
    }
}

impl Drop for Message<'_> {
    fn drop(&mut self) {
        // Already unwinding: write but do not raise a second panic.
        self.deliver();
    }
}

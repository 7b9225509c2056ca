//! Process-wide logger indirection.
//!
//! Log statements that are not given an explicit sink write to the *active*
//! sink returned by [`get_logger`]. It starts out as the default
//! [`StreamSink`] on stderr, created on first use, and can be replaced from
//! any thread with [`set_logger`] and restored with [`use_default_logger`].
//!
//! A statement resolves the active sink once, when it starts building its
//! message. Swapping the logger while a message is under construction does
//! not redirect that message.

use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Once;

use lazy_static::lazy_static;
use parking_lot::Mutex;

use crate::level::Severity;
use crate::module::AsModuleKey;
use crate::sink::Sink;
use crate::stream_sink::StreamSink;

lazy_static! {
    /// The default sink. Statics are never dropped, so it outlives every
    /// other piece of code that might log during teardown.
    static ref DEFAULT_SINK: StreamSink = StreamSink::stderr();

    static ref GLOBAL_SLOT: LoggerSlot = LoggerSlot::new(&*DEFAULT_SINK);
}

static SHUTDOWN: Once = Once::new();

/// Immutable cell the slot points at. Handles are leaked on purpose: a reader
/// may still hold a pointer to a handle that has just been swapped out. Each
/// slot allocates one handle per distinct sink and reuses it afterwards.
struct SinkHandle {
    sink: &'static dyn Sink,
}

/// Swappable reference to an active sink with a default fallback.
///
/// The active sink is replaced as a whole with one atomic pointer swap, so a
/// concurrent reader sees either the old or the new sink, never a mix.
/// Besides the process-wide slot behind [`get_logger`], a `LoggerSlot` can be
/// owned by the application and handed to the code that needs it.
///
/// # Examples
///
/// ```
/// # use benchlog::{LoggerSlot, Sink, StreamSink, Severity};
/// let default: &'static StreamSink = Box::leak(Box::new(StreamSink::new(Vec::<u8>::new())));
/// let other: &'static StreamSink = Box::leak(Box::new(StreamSink::new(Vec::<u8>::new())));
/// let slot = LoggerSlot::new(default);
///
/// slot.set(other);
/// slot.get().set_level(Severity::Error);
/// assert_eq!(other.level(), Severity::Error);
///
/// slot.reset();
/// assert_eq!(slot.get().level(), Severity::Info);
/// ```
pub struct LoggerSlot {
    default: *mut SinkHandle,
    current: AtomicPtr<SinkHandle>,
    handles: Mutex<Vec<*mut SinkHandle>>,
}

// SAFETY: `default` and every pointer stored in `current` come from
// `Box::leak` of an immutable `SinkHandle` holding a `Send + Sync` sink. They
// are never freed or mutated. `handles` only holds copies of those pointers.
unsafe impl Send for LoggerSlot {}
unsafe impl Sync for LoggerSlot {}

impl LoggerSlot {
    /// Creates a slot whose active and default sink is `default`.
    pub fn new(default: &'static dyn Sink) -> Self {
        let handle = Box::into_raw(Box::new(SinkHandle { sink: default }));
        Self {
            default: handle,
            current: AtomicPtr::new(handle),
            handles: Mutex::new(vec![handle]),
        }
    }

    /// The handle for `sink`, allocated on first use.
    fn handle_for(&self, sink: &'static dyn Sink) -> *mut SinkHandle {
        let mut handles = self.handles.lock();
        // Zero-sized sinks may share an address, so those also compare vtables.
        let zero_sized = mem::size_of_val(sink) == 0;
        let existing = handles.iter().copied().find(|&handle| {
            // SAFETY: every stored handle is a live, leaked `SinkHandle`.
            let stored = unsafe { (*handle).sink };
            if zero_sized {
                ptr::eq(stored, sink)
            } else {
                ptr::addr_eq(stored, sink)
            }
        });
        existing.unwrap_or_else(|| {
            let handle = Box::into_raw(Box::new(SinkHandle { sink }));
            handles.push(handle);
            handle
        })
    }

    /// Number of sink handles this slot has allocated, one per distinct sink
    /// ever installed (the default included).
    pub fn handle_count(&self) -> usize {
        self.handles.lock().len()
    }

    /// The active sink.
    #[inline]
    pub fn get(&self) -> &'static dyn Sink {
        // SAFETY: see the `Send`/`Sync` impls, handles live forever.
        unsafe { (*self.current.load(Ordering::Acquire)).sink }
    }

    /// The sink installed at construction.
    pub fn default_sink(&self) -> &'static dyn Sink {
        // SAFETY: see above.
        unsafe { (*self.default).sink }
    }

    /// Makes `sink` the active sink.
    pub fn set(&self, sink: &'static dyn Sink) {
        let handle = self.handle_for(sink);
        self.current.swap(handle, Ordering::AcqRel);
    }

    /// Restores the default sink.
    pub fn reset(&self) {
        self.current.swap(self.default, Ordering::AcqRel);
    }

    /// Whether the default sink is active.
    pub fn is_default(&self) -> bool {
        ptr::eq(self.current.load(Ordering::Acquire), self.default)
    }
}

/// The sink that log statements without an explicit sink write to.
#[inline]
pub fn get_logger() -> &'static dyn Sink {
    GLOBAL_SLOT.get()
}

/// Redirects all subsequent log, check and benchmark output to `sink`.
///
/// ```
/// # use benchlog::{set_logger, use_default_logger, StreamSink};
/// let sink: &'static StreamSink = Box::leak(Box::new(StreamSink::stdout()));
/// set_logger(sink);
/// benchlog::log!("goes to stdout");
/// use_default_logger();
/// ```
pub fn set_logger(sink: &'static dyn Sink) {
    GLOBAL_SLOT.set(sink);
}

/// Restores the default stderr sink as the active sink.
pub fn use_default_logger() {
    GLOBAL_SLOT.reset();
}

/// The process-wide default sink, whether or not it is currently active.
pub fn default_logger() -> &'static StreamSink {
    &DEFAULT_SINK
}

/// Sets the minimum severity accepted by the default sink.
pub fn set_level(level: Severity) {
    DEFAULT_SINK.set_level(level);
}

/// Sets the verbosity threshold of `module` on the default sink.
///
/// ```
/// # use benchlog::{module_tag, set_verbosity};
/// module_tag!(NET = "net");
/// set_verbosity(&NET, 2);
/// ```
pub fn set_verbosity(module: impl AsModuleKey, verbosity: i32) {
    DEFAULT_SINK.set_verbosity(module.module_key(), verbosity);
}

/// Flushes the active and the default sink.
///
/// Meant to be called once when the application exits. Only the first call
/// does anything; the sinks stay usable afterwards.
pub fn shutdown() {
    SHUTDOWN.call_once(|| {
        get_logger().flush();
        DEFAULT_SINK.flush();
    });
}

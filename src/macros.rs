//! Logging, check and benchmark macros.
//!
//! Every logging macro first asks the sink whether the statement would be
//! written. Only then is a [`Message`](crate::Message) created and are the
//! arguments evaluated, so a filtered statement costs one comparison. The
//! `d`-prefixed variants do nothing (and evaluate nothing) in builds without
//! `debug_assertions`.
//!
//! Arguments are appended one after the other, like stream insertion:
//!
//! ```
//! # use benchlog::{log, vlog, module_tag};
//! module_tag!(NET = "net");
//! let peers = vec![3, 7];
//! log!("connected to ", peers.len(), " peers: ", peers);
//! log!(Warn; "retrying");
//! log!(level = benchlog::Severity::Error; "giving up");
//! vlog!(NET, 1; "handshake bytes: ", 512);
//! ```

/// Logs at `Info`, at a named level (`log!(Warn; ...)`) or at a computed level
/// (`log!(level = expr; ...)`) to the active logger.
///
/// Produces `"[LEVEL] file(line): <args>"`. Logging at `Fatal` always writes
/// and then raises [`Failure::Fatal`](crate::Failure).
#[macro_export]
macro_rules! log {
    (level = $level:expr; $($arg:expr),* $(,)?) => {
        $crate::log_to!($crate::get_logger(), $level; $($arg),*)
    };
    ($level:ident; $($arg:expr),* $(,)?) => {
        $crate::log_to!($crate::get_logger(), $crate::Severity::$level; $($arg),*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::log_to!($crate::get_logger(), $crate::Severity::Info; $($arg),*)
    };
}

/// Like [`log!`] with an explicit sink: `log_to!(&sink, Severity::Warn; ...)`.
#[macro_export]
macro_rules! log_to {
    ($sink:expr, $level:expr; $($arg:expr),* $(,)?) => {{
        let __sink: &dyn $crate::Sink = $sink;
        let __level: $crate::Severity = $level;
        if $crate::Sink::enabled(__sink, __level) {
            let mut __message =
                $crate::Message::with_sink(__sink, $crate::Target::Level(__level)).at(file!(), line!());
            $( __message.append(&$arg); )*
            __message.emit();
        }
    }};
}

/// Logs a verbose statement for a module: `vlog!(MODULE, verbosity; ...)`.
///
/// Written as `"[module(verbosity)] file(line): <args>"` only if `verbosity`
/// does not exceed the module's configured threshold (0 when unset).
#[macro_export]
macro_rules! vlog {
    ($module:expr, $verbosity:expr; $($arg:expr),* $(,)?) => {
        $crate::vlog_to!($crate::get_logger(), $module, $verbosity; $($arg),*)
    };
}

/// Like [`vlog!`] with an explicit sink.
#[macro_export]
macro_rules! vlog_to {
    ($sink:expr, $module:expr, $verbosity:expr; $($arg:expr),* $(,)?) => {{
        let __sink: &dyn $crate::Sink = $sink;
        let __module = $crate::module::AsModuleKey::module_key(&$module);
        let __verbosity: i32 = $verbosity;
        if $crate::Sink::verbose_enabled(__sink, __module, __verbosity) {
            let mut __message = $crate::Message::with_sink(
                __sink,
                $crate::Target::Verbose {
                    module: __module,
                    verbosity: __verbosity,
                },
            )
            .at(file!(), line!());
            $( __message.append(&$arg); )*
            __message.emit();
        }
    }};
}

/// Asserts a condition: `check!(cond)` or `check!(cond; "context ", value)`.
///
/// When the condition is false, writes `"[CHECK] file(line): Check failed:
/// <cond> <args>"` to the active logger (whatever its threshold) and raises
/// [`Failure::Check`](crate::Failure). When it holds, nothing is evaluated
/// beyond the condition itself.
#[macro_export]
macro_rules! check {
    ($cond:expr $(; $($arg:expr),* $(,)?)?) => {
        if !($cond) {
            let mut __message =
                $crate::Message::new($crate::Target::Check).at(file!(), line!());
            __message.append("Check failed: ").append(stringify!($cond));
            $(
                __message.append(" ");
                $( __message.append(&$arg); )*
            )?
            __message.emit();
        }
    };
}

/// [`log!`] in debug builds, nothing otherwise.
#[macro_export]
macro_rules! dlog {
    ($($tt:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::log!($($tt)*);
        }
    };
}

/// [`vlog!`] in debug builds, nothing otherwise.
#[macro_export]
macro_rules! dvlog {
    ($($tt:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::vlog!($($tt)*);
        }
    };
}

/// [`check!`] in debug builds, nothing otherwise.
#[macro_export]
macro_rules! dcheck {
    ($($tt:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::check!($($tt)*);
        }
    };
}

/// Starts a [`ScopedBenchmark`](crate::ScopedBenchmark).
///
/// * `benchmark!("label")` returns a handle that reports when dropped.
/// * `benchmark!("label", suite)` also records into `suite`.
/// * `benchmark!("label" => { ... })` and `benchmark!("label", suite => { ... })`
///   time the block and evaluate to its value.
///
/// ```
/// # use benchlog::{benchmark, BenchmarkSuite};
/// let suite = BenchmarkSuite::new("math");
/// let sum = benchmark!("sum", suite => { (1..=100).sum::<u32>() });
/// assert_eq!(sum, 5050);
/// {
///     let _bench = benchmark!("product", suite);
///     let _ = (1..=10).product::<u64>();
/// }
/// assert_eq!(suite.len(), 2);
/// ```
#[macro_export]
macro_rules! benchmark {
    ($label:expr => $body:block) => {{
        let __bench = $crate::ScopedBenchmark::new($label).at(file!(), line!());
        $body
    }};
    ($label:expr, $suite:expr => $body:block) => {{
        let __bench = $crate::ScopedBenchmark::new($label)
            .suite(&$suite)
            .at(file!(), line!());
        $body
    }};
    ($label:expr, $suite:expr) => {
        $crate::ScopedBenchmark::new($label)
            .suite(&$suite)
            .at(file!(), line!())
    };
    ($label:expr) => {
        $crate::ScopedBenchmark::new($label).at(file!(), line!())
    };
}

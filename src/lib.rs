//! # benchlog
//!
//! A small logging and micro-benchmarking library:
//!
//! * **Leveled logging**: `INFO < WARN < ERROR < FATAL < CHECK`, filtered by a
//!   per-sink minimum level
//! * **Module verbosity**: `vlog!(MODULE, n; ...)` statements that stay silent
//!   until a module's verbosity is raised
//! * **Checks**: `check!(cond)` writes the failure and raises
//! * **Scoped benchmarks**: time a scope, report it, and aggregate results
//!   into a chart with `(other)` and `total` rows
//!
//! ## Main Components
//!
//! * [`Sink`]: destination of finished lines; [`StreamSink`] writes text to
//!   any `io::Write` and is the default (stderr)
//! * [`logger`]: process-wide swappable reference to the active sink
//! * [`Message`]: per-statement accumulator behind the macros
//! * [`ScopedBenchmark`] and [`BenchmarkSuite`]: timing and charts
//!
//! Disabled statements are skipped before their arguments are evaluated.
//! Fatal statements and failed checks are always written and then raise a
//! [`Failure`] panic.
//!
//! ## Quick Start
//!
//! ```
//! use benchlog::{benchmark, check, log, module_tag, vlog, BenchmarkSuite, Severity};
//!
//! module_tag!(CACHE = "cache");
//!
//! benchlog::set_level(Severity::Info);
//! benchlog::set_verbosity(&CACHE, 1);
//!
//! log!("starting with ", 4, " workers");
//! log!(Warn; "config file missing, using defaults");
//! vlog!(CACHE, 1; "warming ", 128, " entries");
//! vlog!(CACHE, 2; "not written: verbosity 2 > 1");
//! check!(1 + 1 == 2; "arithmetic");
//!
//! let suite = BenchmarkSuite::new("startup");
//! benchmark!("load", suite => { std::thread::sleep(std::time::Duration::from_millis(1)) });
//! suite.log(Severity::Info);
//! ```

pub mod benchmark;
pub mod bridge;
pub mod clock;
pub mod config;
pub mod error;
pub mod level;
pub mod loggable;
pub mod logger;
pub mod message;
pub mod module;
pub mod sink;
pub mod stream_sink;
pub mod suite;

mod macros;

pub use benchmark::ScopedBenchmark;
pub use clock::Timer;
pub use config::{set_show_location, Config, Output};
pub use error::{Failure, ParseSeverityError};
pub use level::{should_emit, should_emit_verbose, Severity};
pub use loggable::{shown, Loggable, Shown};
pub use logger::{
    default_logger, get_logger, set_level, set_logger, set_verbosity, shutdown,
    use_default_logger, LoggerSlot,
};
pub use message::{emit_with, Message, Target};
pub use module::{ModuleKey, ModuleTag};
pub use sink::Sink;
pub use stream_sink::StreamSink;
pub use suite::{BenchmarkSuite, DEFAULT_PRECISION};

use crate::clock::{pretty_time, Timer};
use crate::level::Severity;
use crate::logger::get_logger;
use crate::message::{with_location, Message, Target};
use crate::module::AsModuleKey;
use crate::sink::Sink;
use crate::suite::{BenchmarkSuite, DEFAULT_PRECISION};

/// Reports taking at least this long also get a `(1m 2.5s)` breakdown.
const BREAKDOWN_THRESHOLD_SECS: f64 = 60.0;

/// Times a scope and reports it through the logger.
///
/// The timer starts when the benchmark is created. When it is stopped, either
/// explicitly with [`stop`](ScopedBenchmark::stop) or by going out of scope,
/// it writes `"<label>: <secs> sec"` and, if attached to a
/// [`BenchmarkSuite`], records the time as a new row. Stopping is idempotent:
/// only the first stop reports.
///
/// Usually created with [`benchmark!`](crate::benchmark).
///
/// # Examples
///
/// ```
/// # use benchlog::{BenchmarkSuite, ScopedBenchmark, Severity};
/// let suite = BenchmarkSuite::new("startup");
/// {
///     let _bench = ScopedBenchmark::new("load config").suite(&suite);
///     // ... work ...
/// }
/// let mut bench = ScopedBenchmark::new("connect").suite(&suite).level(Severity::Warn);
/// bench.stop();
/// bench.stop();
/// assert_eq!(suite.len(), 2);
/// ```
pub struct ScopedBenchmark<'a> {
    label: String,
    sink: &'a dyn Sink,
    suite: Option<&'a BenchmarkSuite>,
    target: Target,
    precision: usize,
    location: Option<(&'static str, u32)>,
    timer: Timer,
    result: Option<f64>,
}

impl ScopedBenchmark<'static> {
    /// Starts a benchmark reporting to the active logger at `Info`.
    pub fn new(label: impl Into<String>) -> Self {
        ScopedBenchmark::with_sink(get_logger(), label)
    }
}

impl<'a> ScopedBenchmark<'a> {
    /// Starts a benchmark reporting to `sink` at `Info`.
    pub fn with_sink(sink: &'a dyn Sink, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sink,
            suite: None,
            target: Target::Level(Severity::Info),
            precision: DEFAULT_PRECISION,
            location: None,
            timer: Timer::new(),
            result: None,
        }
    }

    /// Records the result into `suite` when stopped.
    pub fn suite(mut self, suite: &'a BenchmarkSuite) -> Self {
        self.suite = Some(suite);
        self
    }

    /// Reports to `sink` instead of the logger chosen at construction.
    pub fn sink(mut self, sink: &'a dyn Sink) -> Self {
        self.sink = sink;
        self
    }

    /// Severity of the report. `Fatal` and `Check` reports are written
    /// unfiltered but never raise.
    pub fn level(mut self, level: Severity) -> Self {
        self.target = Target::Level(level);
        self
    }

    /// Reports as a verbose statement of `module` instead of a leveled one.
    pub fn verbose(mut self, module: impl AsModuleKey, verbosity: i32) -> Self {
        self.target = Target::Verbose {
            module: module.module_key(),
            verbosity,
        };
        self
    }

    /// Fractional digits of the reported time.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Attaches the call site to the report line.
    pub fn at(mut self, file: &'static str, line: u32) -> Self {
        self.location = Some((file, line));
        self
    }

    /// Writes `"<label>: start..."` right away, through the same target as
    /// the final report.
    pub fn start_notice(self) -> Self {
        self.report(|label, _| format!("{}: start...", label));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Seconds elapsed so far, or the final time once stopped.
    pub fn elapsed(&self) -> f64 {
        self.result.unwrap_or_else(|| self.timer.elapsed())
    }

    pub fn is_stopped(&self) -> bool {
        self.result.is_some()
    }

    /// Stops the timer, records the time into the suite and reports it.
    ///
    /// Calls after the first are no-ops and return the first result.
    pub fn stop(&mut self) -> f64 {
        if let Some(secs) = self.result {
            return secs;
        }
        let secs = self.timer.elapsed();
        self.result = Some(secs);

        if let Some(suite) = self.suite {
            suite.add_case(self.label.as_str(), secs);
        }
        self.report(|label, precision| format_report(label, secs, precision));
        secs
    }

    fn report(&self, build: impl FnOnce(&str, usize) -> String) {
        if !self.target.enabled_in(self.sink) {
            return;
        }
        let text = build(&self.label, self.precision);

        let unfilterable = match self.target {
            Target::Level(level) if level.is_unfilterable() => Some(level),
            Target::Fatal => Some(Severity::Fatal),
            Target::Check => Some(Severity::Check),
            _ => None,
        };
        if let Some(level) = unfilterable {
            // Reported like any other level, a benchmark never raises.
            let line = with_location(self.location, text);
            self.sink.write_unfiltered(level, &line);
            return;
        }

        let mut message = Message::with_sink(self.sink, self.target);
        if let Some((file, line)) = self.location {
            message = message.at(file, line);
        }
        message.append(text.as_str());
        message.emit();
    }
}

impl Drop for ScopedBenchmark<'_> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `"<label>: <secs> sec"`, plus a breakdown for long runs.
pub fn format_report(label: &str, secs: f64, precision: usize) -> String {
    let mut report = format!("{}: {:.*} sec", label, precision, secs);
    if secs >= BREAKDOWN_THRESHOLD_SECS {
        report.push_str(" (");
        report.push_str(&pretty_time(secs, precision));
        report.push(')');
    }
    report
}

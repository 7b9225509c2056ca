use std::fmt::Write;

use parking_lot::Mutex;

use crate::clock::Timer;
use crate::level::Severity;
use crate::logger::get_logger;
use crate::sink::Sink;

/// Fractional digits printed for times unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 5;

const TIME_COLUMN_TITLE: &str = "time (sec)";
// Wide enough for "(other)".
const MIN_LABEL_WIDTH: usize = 7;

/// A named collection of benchmark results rendered as an aligned chart.
///
/// Cases are kept in the order they were added; the same label may appear
/// several times. The suite runs its own timer from construction, which is
/// reported as `total`, and the time not covered by any case is reported as
/// `(other)`. Neither row is stored, both are computed when rendering.
///
/// Cases may be added from several threads at once.
///
/// # Examples
///
/// ```
/// # use benchlog::BenchmarkSuite;
/// let suite = BenchmarkSuite::new("load");
/// suite.add_case("parse", 0.25);
/// suite.add_case("index", 0.5);
/// let chart = suite.render();
/// assert!(chart.starts_with("load    | time (sec)\n"));
/// assert!(chart.contains("parse   | "));
/// ```
///
/// renders as (the cases were not timed by the suite, so `(other)` is
/// negative)
///
/// ```text
/// load    | time (sec)
/// --------+-----------
/// parse   |    0.25000
/// index   |    0.50000
/// --------+-----------
/// (other) |   -0.74988
/// total   |    0.00012
/// ```
pub struct BenchmarkSuite {
    title: String,
    precision: usize,
    state: Mutex<SuiteState>,
}

struct SuiteState {
    cases: Vec<(String, f64)>,
    timer: Timer,
}

impl BenchmarkSuite {
    /// Creates an empty suite and starts its timer.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            precision: DEFAULT_PRECISION,
            state: Mutex::new(SuiteState {
                cases: Vec::new(),
                timer: Timer::new(),
            }),
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision;
    }

    /// Appends a row.
    pub fn add_case(&self, label: impl Into<String>, secs: f64) {
        self.state.lock().cases.push((label.into(), secs));
    }

    /// Snapshot of the recorded rows in insertion order.
    pub fn cases(&self) -> Vec<(String, f64)> {
        self.state.lock().cases.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().cases.is_empty()
    }

    /// Sum of all recorded case times.
    pub fn time_sum(&self) -> f64 {
        self.state.lock().cases.iter().map(|(_, secs)| secs).sum()
    }

    /// Seconds since the suite was created or last reset.
    pub fn elapsed(&self) -> f64 {
        self.state.lock().timer.elapsed()
    }

    /// Drops every row and restarts the suite timer.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.cases.clear();
        state.timer.restart();
    }

    /// Renders the chart. Every line, including the last, ends with `\n`.
    pub fn render(&self) -> String {
        let state = self.state.lock();
        let total = state.timer.elapsed();
        let sum: f64 = state.cases.iter().map(|(_, secs)| secs).sum();
        let other = total - sum;

        let label_width = state
            .cases
            .iter()
            .map(|(label, _)| label.chars().count())
            .fold(
                MIN_LABEL_WIDTH.max(self.title.chars().count()),
                usize::max,
            );
        let time_width = state
            .cases
            .iter()
            .map(|(_, secs)| *secs)
            .chain([other, total])
            .map(|secs| format!("{:.*}", self.precision, secs).len())
            .fold(TIME_COLUMN_TITLE.len(), usize::max);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<lw$} | {}",
            self.title,
            TIME_COLUMN_TITLE,
            lw = label_width
        );
        let separator = format!("{}-+-{}\n", "-".repeat(label_width), "-".repeat(time_width));
        out.push_str(&separator);
        for (label, secs) in &state.cases {
            self.render_row(&mut out, label, *secs, label_width, time_width);
        }
        out.push_str(&separator);
        self.render_row(&mut out, "(other)", other, label_width, time_width);
        self.render_row(&mut out, "total", total, label_width, time_width);
        out
    }

    fn render_row(&self, out: &mut String, label: &str, secs: f64, lw: usize, tw: usize) {
        let _ = writeln!(
            out,
            "{:<lw$} | {:>tw$.prec$}",
            label,
            secs,
            lw = lw,
            tw = tw,
            prec = self.precision
        );
    }

    /// Writes the chart to the active logger as a single message.
    pub fn log(&self, level: Severity) {
        self.log_to(get_logger(), level);
    }

    /// Writes the chart to `sink` as a single message.
    ///
    /// The chart is rendered and the suite lock released before the sink is
    /// touched.
    pub fn log_to(&self, sink: &dyn Sink, level: Severity) {
        if !sink.enabled(level) {
            return;
        }
        let chart = self.render();
        sink.write_unfiltered(level, chart.trim_end_matches('\n'));
    }
}

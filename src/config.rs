//! Programmatic configuration of the default sink.
//!
//! Everything can also be set piecemeal through [`set_level`](crate::set_level),
//! [`set_verbosity`](crate::set_verbosity) and
//! [`set_show_location`]; [`Config`] bundles the usual settings so an
//! application can apply them in one place at startup.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::level::Severity;
use crate::logger::default_logger;
use crate::module::{AsModuleKey, ModuleKey};
use crate::sink::Sink;

static SHOW_LOCATION: AtomicBool = AtomicBool::new(true);

/// Whether log lines start with the `file(line): ` of the call site.
#[inline]
pub fn show_location() -> bool {
    SHOW_LOCATION.load(Ordering::Relaxed)
}

/// Turns the `file(line): ` prefix of log lines on or off. On by default.
pub fn set_show_location(show: bool) {
    SHOW_LOCATION.store(show, Ordering::Relaxed);
}

/// Where the default sink writes.
pub enum Output {
    Stderr,
    Stdout,
    Writer(Box<dyn Write + Send>),
}

/// Settings for the default sink.
///
/// # Examples
///
/// ```
/// # use benchlog::{Config, Severity, module_tag};
/// module_tag!(NET = "net");
///
/// Config::new()
///     .level(Severity::Warn)
///     .verbosity(&NET, 2)
///     .show_location(false)
///     .apply();
/// # benchlog::Config::new().level(Severity::Info).apply();
/// ```
pub struct Config {
    level: Option<Severity>,
    show_location: bool,
    output: Option<Output>,
    verbosities: Vec<(ModuleKey, i32)>,
}

impl Config {
    /// Call-site locations shown; threshold and output left unchanged.
    pub fn new() -> Self {
        Self {
            level: None,
            show_location: true,
            output: None,
            verbosities: Vec::new(),
        }
    }

    pub fn level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    pub fn show_location(mut self, show: bool) -> Self {
        self.show_location = show;
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    /// Shorthand for `output(Output::Writer(..))`.
    pub fn writer(self, writer: impl Write + Send + 'static) -> Self {
        self.output(Output::Writer(Box::new(writer)))
    }

    pub fn verbosity(mut self, module: impl AsModuleKey, verbosity: i32) -> Self {
        self.verbosities.push((module.module_key(), verbosity));
        self
    }

    /// Applies the settings to the default sink and the global flags.
    ///
    /// Verbosities configured earlier and not mentioned here are kept.
    pub fn apply(self) {
        let sink = default_logger();
        match self.output {
            Some(Output::Stderr) => sink.set_stream(std::io::stderr()),
            Some(Output::Stdout) => sink.set_stream(std::io::stdout()),
            Some(Output::Writer(writer)) => sink.set_stream(writer),
            None => {}
        }
        if let Some(level) = self.level {
            sink.set_level(level);
        }
        for (module, verbosity) in self.verbosities {
            sink.set_verbosity(module, verbosity);
        }
        set_show_location(self.show_location);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
